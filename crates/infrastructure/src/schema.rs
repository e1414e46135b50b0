use sqlx::PgPool;

const SCHEMA: &str = include_str!("../schema.sql");

/// 创建缺失的表；已存在的表保持不变。
pub async fn bootstrap_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::debug!("database schema ensured");
    Ok(())
}
