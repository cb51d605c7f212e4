use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Transaction};
use tracing::warn;

use crate::config::Config;
use crate::crawler::models::{EstateRow, RawEstate};

const UPSERT_SQL: &str = r#"
    INSERT INTO public.realestates (
        id, title, bed_room, max_bed, bathroom, metrage, price, price_min, price_max,
        location, area, money_type, is_multi, houseType, types, image_urls
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
    ON CONFLICT (id) DO UPDATE SET
        title = EXCLUDED.title,
        bed_room = EXCLUDED.bed_room,
        max_bed = EXCLUDED.max_bed,
        bathroom = EXCLUDED.bathroom,
        metrage = EXCLUDED.metrage,
        price = EXCLUDED.price,
        price_min = EXCLUDED.price_min,
        price_max = EXCLUDED.price_max,
        location = EXCLUDED.location,
        area = EXCLUDED.area,
        money_type = EXCLUDED.money_type,
        is_multi = EXCLUDED.is_multi,
        houseType = EXCLUDED.houseType,
        types = EXCLUDED.types,
        image_urls = EXCLUDED.image_urls
"#;

pub struct Storage {
    pool: PgPool,
}

impl Storage {
    pub async fn new(cfg: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&cfg.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Upserts the whole batch inside one transaction; either every row
    /// commits or none does. Records without a usable `id` are skipped.
    pub async fn save_estates_batch(&self, estates: &[RawEstate]) -> Result<usize> {
        let rows: Vec<EstateRow> = estates
            .iter()
            .filter_map(|estate| {
                let row = EstateRow::from_estate(estate);
                if row.is_none() {
                    warn!("estate without a usable id, skipping");
                }
                row
            })
            .collect();

        let mut tx = self.pool.begin().await?;
        for row in &rows {
            upsert_estate(&mut tx, row).await?;
        }
        tx.commit().await?;

        Ok(rows.len())
    }
}

async fn upsert_estate(tx: &mut Transaction<'_, Postgres>, row: &EstateRow) -> Result<()> {
    sqlx::query(UPSERT_SQL)
        .bind(row.id)
        .bind(&row.title)
        .bind(row.bed_room)
        .bind(row.max_bed)
        .bind(row.bathroom)
        .bind(row.metrage)
        .bind(row.price)
        .bind(row.price_min)
        .bind(row.price_max)
        .bind(&row.location)
        .bind(&row.area)
        .bind(&row.money_type)
        .bind(row.is_multi)
        .bind(&row.house_type)
        .bind(&row.types)
        .bind(&row.image_urls)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
