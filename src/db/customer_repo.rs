use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::customer;
use super::entities::prelude::Customer;

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    account_number: i64,
    phone: Option<i64>,
) -> Result<customer::Model, sea_orm::DbErr> {
    let model = customer::ActiveModel {
        account_number: Set(account_number),
        name: Set(name.to_string()),
        phone: Set(phone),
        ..Default::default()
    };
    model.insert(db).await
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<customer::Model>, sea_orm::DbErr> {
    Customer::find()
        .order_by_asc(customer::Column::Name)
        .all(db)
        .await
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<customer::Model>, sea_orm::DbErr> {
    Customer::find_by_id(id).one(db).await
}

pub async fn find_by_account_number(
    db: &DatabaseConnection,
    account_number: i64,
) -> Result<Option<customer::Model>, sea_orm::DbErr> {
    Customer::find()
        .filter(customer::Column::AccountNumber.eq(account_number))
        .one(db)
        .await
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    account_number: i64,
    phone: Option<i64>,
) -> Result<Option<customer::Model>, sea_orm::DbErr> {
    let Some(existing) = Customer::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut active: customer::ActiveModel = existing.into();
    active.name = Set(name.to_string());
    active.account_number = Set(account_number);
    active.phone = Set(phone);
    Ok(Some(active.update(db).await?))
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, sea_orm::DbErr> {
    let result = Customer::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
