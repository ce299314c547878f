use mongodb::{
    bson::doc,
    options::IndexOptions,
    Database, IndexModel,
};

use crate::error::Error;

pub async fn ensure_indexes(db: &Database) -> Result<(), Error> {
    // notification_history: unique per (date, symbol), the upsert key
    {
        let col = db.collection::<mongodb::bson::Document>("notification_history");
        let model = IndexModel::builder()
            .keys(doc! { "date": 1, "symbol": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None).await?;
    }

    // stocks_to_monitor: helpful for the active-watch-list scan
    {
        let col = db.collection::<mongodb::bson::Document>("stocks_to_monitor");
        let model = IndexModel::builder()
            .keys(doc! { "is_active": 1 })
            .build();

        let _ = col.create_index(model, None).await;
    }

    Ok(())
}
