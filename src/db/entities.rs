use serde::{Deserialize, Serialize};

/// Collection period for a delivery. Stored as a plain string column; the enum
/// is the validated vocabulary used by forms and filters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Day,
    Evening,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Day => "day",
            Shift::Evening => "evening",
        }
    }
}

impl TryFrom<&str> for Shift {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "day" => Ok(Shift::Day),
            "evening" => Ok(Shift::Evening),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MilkType {
    Cow,
    Buffalo,
}

impl MilkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilkType::Cow => "cow",
            MilkType::Buffalo => "buffalo",
        }
    }
}

impl TryFrom<&str> for MilkType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "cow" => Ok(MilkType::Cow),
            "buffalo" => Ok(MilkType::Buffalo),
            _ => Err(()),
        }
    }
}

#[allow(unused_imports)]
pub mod prelude {
    pub use super::customer::Entity as Customer;
    pub use super::milk_entry::Entity as MilkEntry;
}

pub mod customer {
    use sea_orm::entity::prelude::*;

    #[sea_orm::model]
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "customers")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(unique)]
        pub account_number: i64,
        pub name: String,
        pub phone: Option<i64>,
        #[sea_orm(has_many)]
        pub entries: HasMany<super::milk_entry::Entity>,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod milk_entry {
    use sea_orm::entity::prelude::*;

    #[sea_orm::model]
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "milk_entries")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(indexed)]
        pub customer_id: i32,
        /// Copied from the owning customer at every save; deliberately not kept
        /// in sync when the customer's number changes later.
        pub account_number: i64,
        pub shift: String,
        pub milk_type: String,
        pub fat: f64,
        pub quantity: f64,
        pub amount: f64,
        pub date: Date,
        #[sea_orm(belongs_to, from = "customer_id", to = "id", on_delete = "Cascade")]
        pub customer: HasOne<super::customer::Entity>,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

#[cfg(test)]
mod tests {
    use super::{MilkType, Shift};

    #[test]
    fn shift_string_roundtrip() {
        assert_eq!(Shift::Day.as_str(), "day");
        assert_eq!(Shift::Evening.as_str(), "evening");

        assert_eq!(Shift::try_from("day"), Ok(Shift::Day));
        assert_eq!(Shift::try_from("evening"), Ok(Shift::Evening));
        assert!(Shift::try_from("night").is_err());
    }

    #[test]
    fn milk_type_string_roundtrip() {
        assert_eq!(MilkType::Cow.as_str(), "cow");
        assert_eq!(MilkType::Buffalo.as_str(), "buffalo");

        assert_eq!(MilkType::try_from("cow"), Ok(MilkType::Cow));
        assert_eq!(MilkType::try_from("buffalo"), Ok(MilkType::Buffalo));
        assert!(MilkType::try_from("goat").is_err());
    }
}
