#![cfg(test)]

use crate::{ContractError, HealthRecordsContract, HealthRecordsContractClient, Role};
use soroban_sdk::{testutils::Address as _, Address, BytesN, Env, String};

fn setup_test() -> (Env, HealthRecordsContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(HealthRecordsContract, ());
    let client = HealthRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    (env, client, admin)
}

fn practitioner(env: &Env, client: &HealthRecordsContractClient, admin: &Address) -> Address {
    let p = Address::generate(env);
    client.grant_role(admin, &p, &Role::Practitioner);
    p
}

fn create(
    env: &Env,
    client: &HealthRecordsContractClient,
    creator: &Address,
    subject: &Address,
    byte: u8,
) -> u64 {
    client.create_record(
        creator,
        subject,
        &BytesN::from_array(env, &[byte; 32]),
        &String::from_str(env, "store://blob"),
        &String::from_str(env, "v1"),
    )
}

#[test]
fn test_broad_approval_covers_past_and_future_records() {
    let (env, client, admin) = setup_test();
    let subject = Address::generate(&env);
    let author = practitioner(&env, &client, &admin);
    let reader = practitioner(&env, &client, &admin);

    client.grant_broad_approval(&subject, &author);
    let first = create(&env, &client, &author, &subject, 1);
    assert!(!client.can_view(&first, &reader));

    client.grant_broad_approval(&subject, &reader);
    let second = create(&env, &client, &author, &subject, 2);
    assert!(client.can_view(&first, &reader));
    assert!(client.can_view(&second, &reader));

    client.revoke_broad_approval(&subject, &reader);
    assert!(!client.can_view(&first, &reader));
    assert!(!client.can_view(&second, &reader));
}

#[test]
fn test_broad_approval_is_idempotent_overwrite() {
    let (env, client, _admin) = setup_test();
    let subject = Address::generate(&env);
    let other = Address::generate(&env);

    client.grant_broad_approval(&subject, &other);
    client.grant_broad_approval(&subject, &other);
    assert!(client.has_broad_approval(&subject, &other));

    client.revoke_broad_approval(&subject, &other);
    client.revoke_broad_approval(&subject, &other);
    assert!(!client.has_broad_approval(&subject, &other));
}

#[test]
fn test_share_record_grants_single_record() {
    let (env, client, admin) = setup_test();
    let subject = Address::generate(&env);
    let author = practitioner(&env, &client, &admin);
    let second_opinion = practitioner(&env, &client, &admin);

    client.grant_broad_approval(&subject, &author);
    let shared = create(&env, &client, &author, &subject, 1);
    let private = create(&env, &client, &author, &subject, 2);

    client.share_record(&subject, &shared, &second_opinion);
    assert!(client.can_view(&shared, &second_opinion));
    assert!(!client.can_view(&private, &second_opinion));
    assert!(!client.has_broad_approval(&subject, &second_opinion));

    client.revoke_record_access(&subject, &shared, &second_opinion);
    assert!(!client.can_view(&shared, &second_opinion));
    assert!(!client.has_record_grant(&shared, &second_opinion));
}

#[test]
fn test_share_record_errors() {
    let (env, client, admin) = setup_test();
    let subject = Address::generate(&env);
    let stranger = Address::generate(&env);
    let author = practitioner(&env, &client, &admin);
    let reader = practitioner(&env, &client, &admin);

    client.grant_broad_approval(&subject, &author);
    let id = create(&env, &client, &author, &subject, 1);

    let res = client.try_share_record(&subject, &99, &reader);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::RecordNotFound);

    // Only the subject controls the record, not its creator.
    let res = client.try_share_record(&author, &id, &reader);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);

    let res = client.try_share_record(&subject, &id, &stranger);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::InvalidTarget);

    let res = client.try_revoke_record_access(&subject, &99, &reader);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::RecordNotFound);

    let res = client.try_revoke_record_access(&stranger, &id, &author);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert!(client.has_record_grant(&id, &author));
}

#[test]
fn test_revoke_record_access_ignores_target_role() {
    let (env, client, admin) = setup_test();
    let subject = Address::generate(&env);
    let author = practitioner(&env, &client, &admin);

    client.grant_broad_approval(&subject, &author);
    let id = create(&env, &client, &author, &subject, 1);
    client.revoke_role(&admin, &author, &Role::Practitioner);

    client.revoke_record_access(&subject, &id, &author);
    assert!(!client.has_record_grant(&id, &author));
}

#[test]
fn test_role_revocation_hides_without_clearing_grants() {
    let (env, client, admin) = setup_test();
    let subject = Address::generate(&env);
    let author = practitioner(&env, &client, &admin);

    client.grant_broad_approval(&subject, &author);
    let id = create(&env, &client, &author, &subject, 1);
    assert!(client.can_view(&id, &author));

    client.revoke_role(&admin, &author, &Role::Practitioner);
    assert!(!client.can_view(&id, &author));
    assert!(client.has_broad_approval(&subject, &author));
    assert!(client.has_record_grant(&id, &author));

    // Restoring the role restores visibility from the untouched flags.
    client.grant_role(&admin, &author, &Role::Practitioner);
    assert!(client.can_view(&id, &author));
}

#[test]
fn test_can_view_unknown_record() {
    let (env, client, admin) = setup_test();
    let reader = practitioner(&env, &client, &admin);
    assert!(!client.can_view(&0, &reader));
    assert!(!client.can_view(&1, &reader));
}

#[test]
fn test_subject_is_not_implicitly_a_viewer() {
    let (env, client, admin) = setup_test();
    let subject = Address::generate(&env);
    let author = practitioner(&env, &client, &admin);

    client.grant_broad_approval(&subject, &author);
    let id = create(&env, &client, &author, &subject, 1);

    // Visibility is defined for practitioners only.
    assert!(!client.can_view(&id, &subject));
}
