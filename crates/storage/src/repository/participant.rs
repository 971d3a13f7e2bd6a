use sqlx::{PgConnection, PgPool};

use crate::dto::participant::{
    CreateParticipantRequest, ParticipantTimes, RecordTimesRequest, UpdateParticipantRequest,
};
use crate::error::{Result, StorageError};
use crate::models::Participant;

const PARTICIPANT_COLUMNS: &str = "participant_id, active, start_nr, first_name, last_name, \
    address, postal_code, city, email, phone, photo_url, \
    time1, time2, time3, time4, time5, time6, \
    round1_qualified, round2_qualified, round3_qualified, intermediate_qualified, final_qualified, \
    created_at";

/// Repository for participant records
pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all participants in registration order
    pub async fn list(&self) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants ORDER BY participant_id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE participant_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// The participant currently shown on the live screen, if any
    pub async fn find_active(&self) -> Result<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE active LIMIT 1"
        ))
        .fetch_optional(self.pool)
        .await?;

        Ok(participant)
    }

    /// Register a new participant with no times and no qualifications
    pub async fn create(&self, req: &CreateParticipantRequest) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            INSERT INTO participants (
                start_nr, first_name, last_name, address, postal_code, city,
                email, phone, photo_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(req.start_nr)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.address)
        .bind(&req.postal_code)
        .bind(&req.city)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.photo_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_duplicate_start_nr())?;

        Ok(participant)
    }

    /// Update registration data; fields missing from the request keep their value
    pub async fn update(
        &self,
        existing: &Participant,
        req: &UpdateParticipantRequest,
    ) -> Result<Participant> {
        let start_nr = req.start_nr.or(existing.start_nr);
        let first_name = req.first_name.as_ref().unwrap_or(&existing.first_name);
        let last_name = req.last_name.as_ref().unwrap_or(&existing.last_name);
        let address = req.address.as_ref().unwrap_or(&existing.address);
        let postal_code = req.postal_code.as_ref().unwrap_or(&existing.postal_code);
        let city = req.city.as_ref().unwrap_or(&existing.city);
        let email = req.email.as_ref().or(existing.email.as_ref());
        let phone = req.phone.as_ref().or(existing.phone.as_ref());
        let photo_url = req.photo_url.as_ref().or(existing.photo_url.as_ref());

        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            UPDATE participants
            SET start_nr = $2,
                first_name = $3,
                last_name = $4,
                address = $5,
                postal_code = $6,
                city = $7,
                email = $8,
                phone = $9,
                photo_url = $10
            WHERE participant_id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(existing.participant_id)
        .bind(start_nr)
        .bind(first_name)
        .bind(last_name)
        .bind(address)
        .bind(postal_code)
        .bind(city)
        .bind(email)
        .bind(phone)
        .bind(photo_url)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_duplicate_start_nr())?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE participant_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Remove every participant; returns how many were deleted
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM participants")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Replace the six ride times of one participant
    pub async fn record_times(&self, id: i32, times: &RecordTimesRequest) -> Result<Participant> {
        let participant = update_times(&mut *self.pool.acquire().await?, id, times)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// Replace the ride times of several participants in one transaction.
    ///
    /// An unknown participant id aborts the whole batch.
    pub async fn record_times_bulk(
        &self,
        entries: &[ParticipantTimes],
    ) -> Result<Vec<Participant>> {
        let mut tx = self.pool.begin().await?;
        let mut updated = Vec::with_capacity(entries.len());

        for entry in entries {
            let participant = update_times(&mut tx, entry.participant_id, &entry.times)
                .await?
                .ok_or(StorageError::NotFound)?;
            updated.push(participant);
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Make `id` the only active participant.
    ///
    /// The marker is cleared everywhere before it is set, inside one
    /// transaction, so no reader ever sees two active participants. Concurrent
    /// calls queue on the table lock and the last one to commit wins. An
    /// unknown id rolls back and leaves the previous active participant in place.
    pub async fn set_active(&self, id: i32) -> Result<Participant> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("LOCK TABLE participants IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        Self::clear_active_in(&mut tx).await?;

        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            UPDATE participants
            SET active = TRUE
            WHERE participant_id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        tx.commit().await?;
        Ok(participant)
    }

    pub async fn clear_active(&self) -> Result<u64> {
        Self::clear_active_in(&mut *self.pool.acquire().await?).await
    }

    pub async fn clear_active_in(conn: &mut PgConnection) -> Result<u64> {
        let result = sqlx::query("UPDATE participants SET active = FALSE WHERE active")
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Lock the participant table against other writers for the rest of the
    /// transaction and read a consistent snapshot, in registration order.
    pub async fn lock_all(conn: &mut PgConnection) -> Result<Vec<Participant>> {
        sqlx::query("LOCK TABLE participants IN EXCLUSIVE MODE")
            .execute(&mut *conn)
            .await?;

        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants ORDER BY participant_id"
        ))
        .fetch_all(&mut *conn)
        .await?;

        Ok(participants)
    }

    /// Write back times and qualification flags of the given participants.
    ///
    /// The active marker is not touched here; it has its own operations.
    pub async fn save_results(
        conn: &mut PgConnection,
        participants: &[Participant],
    ) -> Result<u64> {
        let mut written = 0;

        for participant in participants {
            let result = sqlx::query(
                r#"
                UPDATE participants
                SET time1 = $2,
                    time2 = $3,
                    time3 = $4,
                    time4 = $5,
                    time5 = $6,
                    time6 = $7,
                    round1_qualified = $8,
                    round2_qualified = $9,
                    round3_qualified = $10,
                    intermediate_qualified = $11,
                    final_qualified = $12
                WHERE participant_id = $1
                "#,
            )
            .bind(participant.participant_id)
            .bind(participant.time1)
            .bind(participant.time2)
            .bind(participant.time3)
            .bind(participant.time4)
            .bind(participant.time5)
            .bind(participant.time6)
            .bind(participant.round1_qualified)
            .bind(participant.round2_qualified)
            .bind(participant.round3_qualified)
            .bind(participant.intermediate_qualified)
            .bind(participant.final_qualified)
            .execute(&mut *conn)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StorageError::NotFound);
            }
            written += result.rows_affected();
        }

        Ok(written)
    }
}

async fn update_times(
    conn: &mut PgConnection,
    id: i32,
    times: &RecordTimesRequest,
) -> Result<Option<Participant>> {
    let participant = sqlx::query_as::<_, Participant>(&format!(
        r#"
        UPDATE participants
        SET time1 = $2, time2 = $3, time3 = $4, time4 = $5, time5 = $6, time6 = $7
        WHERE participant_id = $1
        RETURNING {PARTICIPANT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(times.time1)
    .bind(times.time2)
    .bind(times.time3)
    .bind(times.time4)
    .bind(times.time5)
    .bind(times.time6)
    .fetch_optional(conn)
    .await?;

    Ok(participant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn database() -> Database {
        let url = std::env::var("DATABASE_URL").unwrap();
        let db = Database::new(&url).await.unwrap();
        db.run_migrations().await.unwrap();
        db
    }

    fn registration(start_nr: i32) -> CreateParticipantRequest {
        CreateParticipantRequest {
            start_nr: Some(start_nr),
            first_name: format!("Rider{start_nr}"),
            last_name: "Huber".to_string(),
            address: "Dorfstrasse 1".to_string(),
            postal_code: "6300".to_string(),
            city: "Zug".to_string(),
            email: None,
            phone: None,
            photo_url: None,
        }
    }

    #[tokio::test]
    #[ignore] // Only run against a disposable Postgres in DATABASE_URL
    async fn test_set_active_serializes_concurrent_calls() {
        let db = database().await;
        let repo = ParticipantRepository::new(db.pool());
        repo.delete_all().await.unwrap();

        let first = repo.create(&registration(1)).await.unwrap();
        let second = repo.create(&registration(2)).await.unwrap();

        for _ in 0..20 {
            let (a, b) = tokio::join!(
                repo.set_active(first.participant_id),
                repo.set_active(second.participant_id)
            );
            assert!(a.is_ok());
            assert!(b.is_ok());

            let active: Vec<i32> = repo
                .list()
                .await
                .unwrap()
                .into_iter()
                .filter(|p| p.active)
                .map(|p| p.participant_id)
                .collect();
            assert_eq!(active.len(), 1);
        }

        repo.set_active(first.participant_id).await.unwrap();
        let unknown = repo.set_active(second.participant_id + 1000).await;

        assert!(matches!(unknown, Err(StorageError::NotFound)));
        let active = repo.find_active().await.unwrap().unwrap();
        assert_eq!(active.participant_id, first.participant_id);
    }
}
