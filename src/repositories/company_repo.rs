use crate::dto::profile_dto::UpdateCompanyPayload;
use crate::error::Result;
use crate::models::company::Company;
use sqlx::PgPool;

const COMPANY_COLUMNS: &str = "id, user_id, name, tax_id, address, phone, description";

#[derive(Clone)]
pub struct CompanyRepo {
    pool: PgPool,
}

impl CompanyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Companies whose owning account has not been soft-deleted.
    pub async fn list(&self) -> Result<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT c.id, c.user_id, c.name, c.tax_id, c.address, c.phone, c.description
             FROM companies c
             JOIN users u ON u.id = c.user_id
             WHERE NOT u.removed
             ORDER BY c.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(companies)
    }

    pub async fn update(&self, user_id: i64, payload: &UpdateCompanyPayload) -> Result<Company> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "UPDATE companies SET
                name = COALESCE($2, name),
                tax_id = COALESCE($3, tax_id),
                address = COALESCE($4, address),
                phone = COALESCE($5, phone),
                description = COALESCE($6, description)
             WHERE user_id = $1
             RETURNING {COMPANY_COLUMNS}"
        ))
        .bind(user_id)
        .bind(payload.name.as_deref())
        .bind(payload.tax_id.as_deref())
        .bind(payload.address.as_deref())
        .bind(payload.phone.as_deref())
        .bind(payload.description.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(company)
    }
}
