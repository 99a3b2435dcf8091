use chrono::{DateTime, Utc};
use redb::TypeName;
use std::cmp::Ordering;

/// A chronologically ordered table key: `(timestamp, id)`.
///
/// Used wherever a table must be scanned in time order: series by creation
/// time for pruning, cache rows by end time for point-in-time lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeKey {
    pub timestamp: DateTime<Utc>,
    pub id: u64,
}

const SIGN_BIT: u64 = 1 << 63;
const ENCODED_LEN: usize = 8 + 4 + 8;

impl TimeKey {
    pub fn new(timestamp: DateTime<Utc>, id: u64) -> Self {
        Self { timestamp, id }
    }

    /// Sorts before every other key with the same timestamp.
    pub fn lower(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, id: 0 }
    }
}

fn extract_timestamp(data: &[u8]) -> ((i64, u32), &[u8]) {
    let (secs, data) = data.split_first_chunk::<8>().unwrap();
    let secs = (u64::from_be_bytes(*secs) ^ SIGN_BIT) as i64;
    let (nanos, data) = data.split_first_chunk::<4>().unwrap();
    let nanos = u32::from_be_bytes(*nanos);

    ((secs, nanos), data)
}

impl redb::Key for TimeKey {
    fn compare(data1: &[u8], data2: &[u8]) -> Ordering {
        let (ts1, data1) = extract_timestamp(data1);
        let (ts2, data2) = extract_timestamp(data2);

        ts1.cmp(&ts2).then_with(|| {
            let id1 = u64::from_be_bytes(*data1.first_chunk::<8>().unwrap());
            let id2 = u64::from_be_bytes(*data2.first_chunk::<8>().unwrap());
            id1.cmp(&id2)
        })
    }
}

impl redb::Value for TimeKey {
    type SelfType<'a> = TimeKey;
    type AsBytes<'a> = Vec<u8>;

    fn fixed_width() -> Option<usize> {
        Some(ENCODED_LEN)
    }

    fn from_bytes<'a>(data: &'a [u8]) -> Self::SelfType<'a>
    where
        Self: 'a,
    {
        let ((secs, nanos), data) = extract_timestamp(data);
        let id = u64::from_be_bytes(*data.first_chunk::<8>().unwrap());

        TimeKey {
            timestamp: DateTime::from_timestamp(secs, nanos).expect("timestamp out of range"),
            id,
        }
    }

    fn as_bytes<'a, 'b: 'a>(value: &'a Self::SelfType<'b>) -> Self::AsBytes<'a>
    where
        Self: 'b,
    {
        let mut bytes = Vec::with_capacity(ENCODED_LEN);
        let secs = value.timestamp.timestamp() as u64 ^ SIGN_BIT;
        bytes.extend_from_slice(&secs.to_be_bytes());
        bytes.extend_from_slice(&value.timestamp.timestamp_subsec_nanos().to_be_bytes());
        bytes.extend_from_slice(&value.id.to_be_bytes());
        bytes
    }

    fn type_name() -> TypeName {
        TypeName::new("parking_permits::TimeKey")
    }
}

#[cfg(test)]
mod tests;
