use chrono::{Local, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::prelude::MilkEntry;
use super::entities::{MilkType, Shift, customer, milk_entry};

/// Optional narrowing for ledger queries. `milk_type` and `shift` are matched as
/// raw strings: an unknown value matches no rows rather than being ignored.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub customer_id: Option<i32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub milk_type: Option<String>,
    pub shift: Option<String>,
}

pub async fn create(
    db: &DatabaseConnection,
    customer: &customer::Model,
    shift: Shift,
    milk_type: MilkType,
    fat: f64,
    quantity: f64,
    amount: f64,
) -> Result<milk_entry::Model, sea_orm::DbErr> {
    let model = milk_entry::ActiveModel {
        customer_id: Set(customer.id),
        account_number: Set(customer.account_number),
        shift: Set(shift.as_str().to_string()),
        milk_type: Set(milk_type.as_str().to_string()),
        fat: Set(fat),
        quantity: Set(quantity),
        amount: Set(amount),
        date: Set(Local::now().date_naive()),
        ..Default::default()
    };
    model.insert(db).await
}

/// Full-form update. `date` is never touched; the denormalized account number is
/// re-derived from the given customer on every save.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    customer: &customer::Model,
    shift: Shift,
    milk_type: MilkType,
    fat: f64,
    quantity: f64,
    amount: f64,
) -> Result<Option<milk_entry::Model>, sea_orm::DbErr> {
    let Some(existing) = MilkEntry::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut active: milk_entry::ActiveModel = existing.into();
    active.customer_id = Set(customer.id);
    active.account_number = Set(customer.account_number);
    active.shift = Set(shift.as_str().to_string());
    active.milk_type = Set(milk_type.as_str().to_string());
    active.fat = Set(fat);
    active.quantity = Set(quantity);
    active.amount = Set(amount);
    Ok(Some(active.update(db).await?))
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<milk_entry::Model>, sea_orm::DbErr> {
    MilkEntry::find_by_id(id).one(db).await
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, sea_orm::DbErr> {
    let result = MilkEntry::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// All matching entries, newest first: date descending, ties broken by most
/// recently created (id descending).
pub async fn list_filtered(
    db: &DatabaseConnection,
    filter: &EntryFilter,
) -> Result<Vec<milk_entry::Model>, sea_orm::DbErr> {
    let mut query = MilkEntry::find();
    if let Some(customer_id) = filter.customer_id {
        query = query.filter(milk_entry::Column::CustomerId.eq(customer_id));
    }
    if let Some(from) = filter.date_from {
        query = query.filter(milk_entry::Column::Date.gte(from));
    }
    if let Some(to) = filter.date_to {
        query = query.filter(milk_entry::Column::Date.lte(to));
    }
    if let Some(milk_type) = &filter.milk_type {
        query = query.filter(milk_entry::Column::MilkType.eq(milk_type.as_str()));
    }
    if let Some(shift) = &filter.shift {
        query = query.filter(milk_entry::Column::Shift.eq(shift.as_str()));
    }
    query
        .order_by_desc(milk_entry::Column::Date)
        .order_by_desc(milk_entry::Column::Id)
        .all(db)
        .await
}

pub async fn list_by_customer(
    db: &DatabaseConnection,
    customer_id: i32,
) -> Result<Vec<milk_entry::Model>, sea_orm::DbErr> {
    let filter = EntryFilter {
        customer_id: Some(customer_id),
        ..EntryFilter::default()
    };
    list_filtered(db, &filter).await
}
