use std::collections::BTreeSet;

use aroma_shared::MobileDevice;

use super::{Delete, Insert, Select, Statement};
use crate::codec;
use crate::error::Result;
use crate::tables::preferences::*;

/// Replace the stored device set; an empty set removes the row.
pub fn save(user_id: &str, devices: &BTreeSet<MobileDevice>) -> Result<Statement> {
    if devices.is_empty() {
        return Ok(delete(user_id));
    }

    Ok(Insert::into_table(TABLE)
        .value(USER_ID, codec::uuid(user_id))
        .value(DEVICES, codec::json(devices)?)
        .into())
}

pub fn select(user_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}

pub fn delete(user_id: &str) -> Statement {
    Delete::from_table(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value;

    use super::*;

    #[test]
    fn test_devices_are_a_json_array() {
        let devices = BTreeSet::from([MobileDevice::Ios {
            device_token: "abc".into(),
        }]);

        match save("55555555-5555-5555-5555-555555555555", &devices).unwrap() {
            Statement::Insert(insert) => assert_eq!(
                insert.get(DEVICES),
                Some(&Value::Text(r#"[{"platform":"ios","device_token":"abc"}]"#.into()))
            ),
            other => panic!("unexpected statement {other:?}"),
        }
    }
}
