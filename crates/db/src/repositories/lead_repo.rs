//! Repository for the `leads` table and its `lead_tags` junction.

use std::collections::HashMap;

use leadhub_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::lead::{CreateLead, Lead, LeadResponse, UpdateLead};
use crate::models::tag::Tag;
use crate::models::user::UserSummary;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, source, status, assigned_to, created_at, updated_at";

/// Provides CRUD, search, and reference population for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead and link its tags, returning the created row.
    ///
    /// A missing `status` falls back to the table default (`New`).
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (name, email, phone, source, status, assigned_to)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'New'), $6)
             RETURNING {COLUMNS}"
        );
        let lead = sqlx::query_as::<_, Lead>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.source)
            .bind(&input.status)
            .bind(input.assigned_to)
            .fetch_one(pool)
            .await?;

        if !input.tags.is_empty() {
            Self::link_tags(pool, lead.id, &input.tags).await?;
        }
        Ok(lead)
    }

    /// Find a lead by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a lead with tags and assignee populated.
    pub async fn find_with_refs(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LeadResponse>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(lead) => Ok(Self::populate(pool, vec![lead]).await?.pop()),
            None => Ok(None),
        }
    }

    /// List one page of leads, most recently created first, optionally
    /// filtered by a case-insensitive substring over name/email/phone.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_search_filter(search);
        let query = format!(
            "SELECT {COLUMNS} FROM leads {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, Lead>(&query);
        for val in &bind_values {
            q = q.bind(val.as_str());
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count leads matching the same filter as [`Self::list`] (for
    /// pagination metadata, independent of the page requested).
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_search_filter(search);
        let query = format!("SELECT COUNT(*)::BIGINT FROM leads {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for val in &bind_values {
            q = q.bind(val.as_str());
        }
        q.fetch_one(pool).await
    }

    /// List every lead assigned to one user, unpaginated, newest first.
    pub async fn list_assigned(pool: &PgPool, user_id: DbId) -> Result<Vec<Lead>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM leads WHERE assigned_to = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Lead>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Partial update. Only non-`None` fields in `input` are applied; a
    /// `Some` tag set replaces the junction rows wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                source = COALESCE($5, source),
                status = COALESCE($6, status),
                assigned_to = COALESCE($7, assigned_to),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let lead = sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.source)
            .bind(&input.status)
            .bind(input.assigned_to)
            .fetch_optional(pool)
            .await?;

        if let Some(lead) = &lead {
            if let Some(tags) = &input.tags {
                Self::replace_tags(pool, lead.id, tags).await?;
            }
        }
        Ok(lead)
    }

    /// Status-only update. Returns `None` if no row exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a lead. Its junction rows die by FK cascade; comments and
    /// activity logs referencing it are left orphaned on purpose.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Populate tags and assignees for a page of leads in two batched
    /// queries, preserving the input order.
    pub async fn populate(
        pool: &PgPool,
        leads: Vec<Lead>,
    ) -> Result<Vec<LeadResponse>, sqlx::Error> {
        if leads.is_empty() {
            return Ok(Vec::new());
        }

        let lead_ids: Vec<DbId> = leads.iter().map(|l| l.id).collect();
        let tag_rows = sqlx::query_as::<_, LeadTagRow>(
            "SELECT lt.lead_id, t.id, t.name, t.created_at, t.updated_at
             FROM lead_tags lt
             JOIN tags t ON t.id = lt.tag_id
             WHERE lt.lead_id = ANY($1)
             ORDER BY t.name ASC",
        )
        .bind(&lead_ids)
        .fetch_all(pool)
        .await?;

        let mut tags_by_lead: HashMap<DbId, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags_by_lead.entry(row.lead_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
                created_at: row.created_at,
                updated_at: row.updated_at,
            });
        }

        let assignee_ids: Vec<DbId> = leads.iter().filter_map(|l| l.assigned_to).collect();
        let mut users_by_id: HashMap<DbId, UserSummary> = HashMap::new();
        if !assignee_ids.is_empty() {
            let users =
                sqlx::query_as::<_, UserSummary>("SELECT id, name, email FROM users WHERE id = ANY($1)")
                    .bind(&assignee_ids)
                    .fetch_all(pool)
                    .await?;
            for user in users {
                users_by_id.insert(user.id, user);
            }
        }

        Ok(leads
            .into_iter()
            .map(|lead| {
                let tags = tags_by_lead.remove(&lead.id).unwrap_or_default();
                let assigned_to = lead.assigned_to.and_then(|id| users_by_id.get(&id).cloned());
                LeadResponse {
                    id: lead.id,
                    name: lead.name,
                    email: lead.email,
                    phone: lead.phone,
                    source: lead.source,
                    status: lead.status,
                    tags,
                    assigned_to,
                    created_at: lead.created_at,
                    updated_at: lead.updated_at,
                }
            })
            .collect())
    }

    /// Link tags to a lead. Ids without a matching tag row are skipped, so a
    /// stale id in the request degrades to an absent tag instead of an error.
    async fn link_tags(pool: &PgPool, lead_id: DbId, tag_ids: &[DbId]) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO lead_tags (lead_id, tag_id)
             SELECT $1, t.id FROM tags t WHERE t.id = ANY($2)
             ON CONFLICT DO NOTHING",
        )
        .bind(lead_id)
        .bind(tag_ids)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Replace a lead's tag set wholesale.
    async fn replace_tags(
        pool: &PgPool,
        lead_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM lead_tags WHERE lead_id = $1")
            .bind(lead_id)
            .execute(pool)
            .await?;
        if !tag_ids.is_empty() {
            Self::link_tags(pool, lead_id, tag_ids).await?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Joined junction row used by [`LeadRepo::populate`].
#[derive(sqlx::FromRow)]
struct LeadTagRow {
    lead_id: DbId,
    id: DbId,
    name: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Build a WHERE clause and bind values for the lead search filter.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause is
/// empty when no usable search term is present, or starts with `WHERE `.
fn build_search_filter(search: Option<&str>) -> (String, Vec<String>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<String> = Vec::new();

    if let Some(term) = search {
        let term = term.trim();
        if !term.is_empty() {
            conditions.push(format!(
                "(name ILIKE ${bind_idx} OR email ILIKE ${bind_idx} OR phone ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
            bind_values.push(format!("%{term}%"));
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_search_yield_no_filter() {
        let (clause, values, idx) = build_search_filter(None);
        assert_eq!(clause, "");
        assert!(values.is_empty());
        assert_eq!(idx, 1);

        let (clause, values, _) = build_search_filter(Some("   "));
        assert_eq!(clause, "");
        assert!(values.is_empty());
    }

    #[test]
    fn search_term_filters_all_three_columns_with_one_bind() {
        let (clause, values, idx) = build_search_filter(Some("jo"));
        assert_eq!(
            clause,
            "WHERE (name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1)"
        );
        assert_eq!(values, vec!["%jo%".to_string()]);
        assert_eq!(idx, 2);
    }
}
