use crate::{error::Error, QueryFilterMap};
use sea_orm::strum::IntoEnumIterator;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Select};

/// Find all records of an entity by the given query filter map.
pub async fn find_by<E, C>(
    db: &impl ConnectionTrait,
    query_filter_map: QueryFilterMap,
) -> Result<Vec<E::Model>, Error>
where
    E: EntityTrait<Column = C>,
    C: ColumnTrait + IntoEnumIterator,
{
    Ok(filtered::<E, C>(&query_filter_map).all(db).await?)
}

/// Like [`find_by`], but sorted ascending by `order_column`.
pub async fn find_by_ordered<E, C>(
    db: &impl ConnectionTrait,
    query_filter_map: QueryFilterMap,
    order_column: C,
) -> Result<Vec<E::Model>, Error>
where
    E: EntityTrait<Column = C>,
    C: ColumnTrait + IntoEnumIterator,
{
    Ok(filtered::<E, C>(&query_filter_map)
        .order_by_asc(order_column)
        .all(db)
        .await?)
}

// Only the entity's own columns are considered, so unknown keys in the map
// are silently ignored.
fn filtered<E, C>(query_filter_map: &QueryFilterMap) -> Select<E>
where
    E: EntityTrait<Column = C>,
    C: ColumnTrait + IntoEnumIterator,
{
    C::iter().fold(E::find(), |query, column| {
        match query_filter_map.get(&column.to_string()) {
            Some(value) => query.filter(column.eq(value)),
            None => query,
        }
    })
}
