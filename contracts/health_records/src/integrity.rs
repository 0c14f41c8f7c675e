use crate::records;
use soroban_sdk::{contracttype, Address, BytesN, Env, String};

/// Result of a fingerprint lookup. When `found` is false the remaining
/// fields hold their empty values: id 0, no subject, empty version.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FingerprintMatch {
    pub found: bool,
    pub record_id: u64,
    pub subject: Option<Address>,
    pub version: String,
}

impl FingerprintMatch {
    fn not_found(env: &Env) -> Self {
        FingerprintMatch {
            found: false,
            record_id: 0,
            subject: None,
            version: String::from_str(env, ""),
        }
    }
}

/// Scans the ledger in ascending id order and reports the first record whose
/// fingerprint equals `fingerprint`.
///
/// No secondary index is kept; cost grows with the number of records. Large
/// deployments should index `REC_ADD` events off-chain instead.
pub fn verify_by_fingerprint(env: &Env, fingerprint: &BytesN<32>) -> FingerprintMatch {
    let count = records::record_count(env);
    for record_id in 1..=count {
        if let Some(record) = records::get_record(env, record_id) {
            if record.fingerprint == *fingerprint {
                return FingerprintMatch {
                    found: true,
                    record_id,
                    subject: Some(record.subject),
                    version: record.version,
                };
            }
        }
    }
    FingerprintMatch::not_found(env)
}
