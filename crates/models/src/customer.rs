use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{entity::prelude::*, ActiveValue::NotSet, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::{coupon, customer_coupon, errors::ModelError};

/// A lowercase letter followed by at least two of `a-z`, `0-9`, `-`, `.`.
pub const USERNAME_PATTERN: &str = r"[a-z]+[a-z0-9.\-]{2,}";

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{USERNAME_PATTERN})$")).expect("username pattern compiles")
});

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, indexed)]
    pub username: String,
    #[sea_orm(indexed)]
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    CustomerCoupon,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CustomerCoupon => Entity::has_many(customer_coupon::Entity).into(),
        }
    }
}

impl Related<customer_coupon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerCoupon.def()
    }
}

impl Related<coupon::Entity> for Entity {
    fn to() -> RelationDef {
        customer_coupon::Relation::Coupon.def()
    }

    fn via() -> Option<RelationDef> {
        Some(customer_coupon::Relation::Customer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    if !USERNAME_RE.is_match(username) {
        return Err(ModelError::validation(format!(
            "username must match {USERNAME_PATTERN}"
        )));
    }
    Ok(())
}

/// Username that passed [`validate_username`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        Self::try_from(raw.to_string())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_username(&value)?;
        Ok(Self(value))
    }
}

/// Creation shape; `id` and `created_at` are assigned by the server.
#[derive(Clone, Debug, Deserialize)]
pub struct CustomerCreate {
    pub username: Username,
    pub name: String,
}

impl CustomerCreate {
    pub fn new(username: &str, name: &str) -> Result<Self, ModelError> {
        Ok(Self { username: Username::parse(username)?, name: name.to_string() })
    }
}

impl IntoActiveModel<ActiveModel> for CustomerCreate {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            username: Set(self.username.into_inner()),
            name: Set(self.name),
            created_at: Set(Utc::now()),
        }
    }
}

/// Partial update; absent (or `null`) fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CustomerUpdate {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_pattern() {
        for ok in ["jack", "whoami", "a.b", "j-1", "abc123"] {
            assert!(validate_username(ok).is_ok(), "{ok}");
        }
        for bad in ["x", "ab", "Jack", "1abc", "ja ck", "jack!", ""] {
            assert!(validate_username(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn create_rejects_bad_username_at_deserialization() {
        let bad = serde_json::from_str::<CustomerCreate>(r#"{"username":"x","name":"Too short"}"#);
        assert!(bad.is_err());
        let missing = serde_json::from_str::<CustomerCreate>(r#"{"name":"Yoda"}"#);
        assert!(missing.is_err());
        let wrong_type = serde_json::from_str::<CustomerCreate>(r#"{"username":"whoami","name":{}}"#);
        assert!(wrong_type.is_err());
    }

    #[test]
    fn create_leaves_id_unset_and_stamps_created_at() {
        let before = Utc::now();
        let am = CustomerCreate::new("jack", "Jack").unwrap().into_active_model();
        assert!(am.id.is_not_set());
        assert_eq!(am.username.clone().unwrap(), "jack");
        let created = am.created_at.unwrap();
        assert!(created >= before && created <= Utc::now());
    }

    #[test]
    fn empty_update_is_all_none() {
        let patch: CustomerUpdate = serde_json::from_str("{}").unwrap();
        assert!(patch.name.is_none());
    }
}
