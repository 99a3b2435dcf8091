//! On-disk record encoding: one schema-version byte followed by postcard.

use redb::TypeName;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub mod v1;
pub use v1 as latest;

pub trait RecordVariant: Debug + Serialize + DeserializeOwned + 'static {
    const VERSION: u8;
    const TYPE_NAME: &'static str;
}

/// A record stored with its schema version.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T>(pub T);

impl<T: RecordVariant> Versioned<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: RecordVariant> redb::Value for Versioned<T> {
    type SelfType<'a> = Versioned<T>;
    type AsBytes<'a> = Vec<u8>;

    fn fixed_width() -> Option<usize> {
        None
    }

    fn from_bytes<'a>(data: &'a [u8]) -> Self::SelfType<'a>
    where
        Self: 'a,
    {
        let (version, data) = data.split_first().expect("empty record");
        match *version {
            v if v == T::VERSION => {
                Versioned(postcard::from_bytes::<T>(data).expect("invalid record"))
            }
            version => panic!("unsupported {} version: {}", T::TYPE_NAME, version),
        }
    }

    fn as_bytes<'a, 'b: 'a>(value: &'a Self::SelfType<'b>) -> Self::AsBytes<'a>
    where
        Self: 'b,
    {
        postcard::to_extend(&value.0, vec![T::VERSION]).expect("record serialization failed")
    }

    fn type_name() -> TypeName {
        TypeName::new(T::TYPE_NAME)
    }
}
