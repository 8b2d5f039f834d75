//! # Membership Repository
//!
//! Database operations for memberships. Deleting a membership detaches its
//! customers (`membership_id` becomes NULL) instead of failing.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::validation::validate_name;
use stockroom_core::{Membership, MembershipPatch, NewMembership};

pub struct MembershipRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> MembershipRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        MembershipRepository { conn }
    }

    pub async fn create(&mut self, input: &NewMembership) -> DbResult<Membership> {
        validate_name("membership_type", &input.membership_type)?;

        let membership = sqlx::query_as::<_, Membership>(
            "INSERT INTO memberships (membership_type) VALUES (?1)
             RETURNING id, membership_type",
        )
        .bind(&input.membership_type)
        .fetch_one(&mut *self.conn)
        .await?;

        debug!(id = membership.id, membership_type = %membership.membership_type, "Membership created");
        Ok(membership)
    }

    pub async fn get_by_id(&mut self, id: i64) -> DbResult<Option<Membership>> {
        let membership = sqlx::query_as::<_, Membership>(
            "SELECT id, membership_type FROM memberships WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(membership)
    }

    pub async fn list_all(&mut self) -> DbResult<Vec<Membership>> {
        let memberships = sqlx::query_as::<_, Membership>(
            "SELECT id, membership_type FROM memberships ORDER BY id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(memberships)
    }

    pub async fn update(
        &mut self,
        id: i64,
        patch: MembershipPatch,
    ) -> DbResult<Option<Membership>> {
        if let Some(membership_type) = patch.membership_type.as_set() {
            validate_name("membership_type", membership_type)?;
        }

        let Some(mut membership) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut membership);

        let updated = sqlx::query_as::<_, Membership>(
            "UPDATE memberships SET membership_type = ?2 WHERE id = ?1
             RETURNING id, membership_type",
        )
        .bind(id)
        .bind(&membership.membership_type)
        .fetch_optional(&mut *self.conn)
        .await?;

        debug!(id = id, "Membership updated");
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        debug!(id = id, deleted = result.rows_affected() > 0, "Membership delete");
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support;
    use stockroom_core::Patch;

    #[tokio::test]
    async fn test_create_get_update() {
        let (_db, mut session) = test_support::session().await;

        let classic = session
            .memberships()
            .create(&NewMembership::default())
            .await
            .unwrap();
        assert_eq!(classic.membership_type, "classic");

        let patch = MembershipPatch {
            membership_type: Patch::Set("premium".to_string()),
        };
        let updated = session
            .memberships()
            .update(classic.id, patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.membership_type, "premium");

        let all = session.memberships().list_all().await.unwrap();
        assert_eq!(all, vec![updated]);
    }

    #[tokio::test]
    async fn test_delete_detaches_customers() {
        let (_db, mut session) = test_support::session().await;
        let membership = test_support::membership(&mut session, "premium").await;
        let customer = test_support::customer(&mut session, Some(membership.id)).await;

        assert!(session.memberships().delete(membership.id).await.unwrap());
        assert!(!session.memberships().delete(membership.id).await.unwrap());

        let customer = session
            .customers()
            .get_by_id(customer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(customer.membership_id, None);
    }
}
