use super::*;
use chrono::{Duration, TimeZone};

fn encode(key: &TimeKey) -> Vec<u8> {
    <TimeKey as redb::Value>::as_bytes(key)
}

#[test]
fn time_key_normal_usage() {
    let key = TimeKey::new(Utc.with_ymd_and_hms(2023, 1, 5, 12, 30, 0).unwrap(), 42);

    let bytes = encode(&key);
    assert_eq!(bytes.len(), ENCODED_LEN);
    assert_eq!(<TimeKey as redb::Value>::from_bytes(&bytes), key);
}

#[test]
fn time_key_keeps_sub_second_precision() {
    let ts = Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap() + Duration::nanoseconds(123_456_789);
    let key = TimeKey::new(ts, 1);

    assert_eq!(<TimeKey as redb::Value>::from_bytes(&encode(&key)).timestamp, ts);
}

#[test]
fn time_key_ordering() {
    let before_epoch = Utc.with_ymd_and_hms(1960, 6, 1, 0, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let later = now + Duration::milliseconds(1);

    let keys = [
        TimeKey::new(before_epoch, 9),
        TimeKey::lower(now),
        TimeKey::new(now, 1),
        TimeKey::new(now, u64::MAX),
        TimeKey::lower(later),
    ];

    for (i, l) in keys.iter().enumerate() {
        for (j, r) in keys.iter().enumerate() {
            assert_eq!(
                <TimeKey as redb::Key>::compare(&encode(l), &encode(r)),
                i.cmp(&j),
                "Comparing {:?} and {:?}",
                l,
                r
            );
        }
    }
}
