use crate::models;
use rust_decimal::Decimal;
use sqlx::{
    FromRow, Row, SqlitePool,
    sqlite::{SqlitePoolOptions, SqliteRow},
};

use super::{CascadeRule, SqliteQuery, StoreError, StoreRecord, StoreResult, sqlite_queries};

/// Generic SQLite-backed record store. One instance per process holds the
/// four collections; every operation is uniform across record kinds.
#[derive(Clone)]
pub struct SqliteStore {
    pub db_pool: SqlitePool,
}

impl SqliteStore {
    pub fn from_pool(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn connect(url: &str) -> StoreResult<Self> {
        Ok(Self {
            db_pool: SqlitePool::connect(url).await?,
        })
    }

    /// Ephemeral store for tests and throwaway sessions. Pinned to one
    /// connection: every sqlite `:memory:` connection is its own database.
    pub async fn open_in_memory() -> StoreResult<Self> {
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self { db_pool })
    }

    /// Creates tables and secondary indexes; safe to re-run.
    pub async fn migrate(&self) -> StoreResult<()> {
        for statement in sqlite_queries::SCHEMA {
            sqlx::raw_sql(statement).execute(&self.db_pool).await?;
        }

        Ok(())
    }

    fn insert_sql<R: StoreRecord>() -> String {
        let placeholders = (1..=R::COLUMNS.len())
            .map(|position| format!("${position}"))
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "INSERT INTO {} ({}) VALUES ({});",
            R::TABLE,
            R::COLUMNS.join(","),
            placeholders
        )
    }

    fn update_sql<R: StoreRecord>() -> String {
        let assignments = R::COLUMNS
            .iter()
            .enumerate()
            .skip(1)
            .map(|(position, column)| format!("{column}=${}", position + 1))
            .collect::<Vec<_>>()
            .join(",");

        format!("UPDATE {} SET {} WHERE id=$1;", R::TABLE, assignments)
    }

    fn check_indexed<R: StoreRecord>(column: &str) -> StoreResult<()> {
        if R::INDEXED.contains(&column) {
            return Ok(());
        }

        Err(StoreError::UnknownIndex {
            table: R::TABLE,
            column: column.to_string(),
        })
    }

    /// Stores a record under its id; fails with [StoreError::DuplicateKey]
    /// when the id is already present.
    pub async fn add<R: StoreRecord>(&self, record: &R) -> StoreResult<()> {
        let sql = Self::insert_sql::<R>();

        match record.bind_columns(sqlx::query(&sql)).execute(&self.db_pool).await {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                Err(StoreError::DuplicateKey {
                    table: R::TABLE,
                    id: record.id().to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Absence is not an error.
    pub async fn get<R: StoreRecord>(&self, id: &str) -> StoreResult<Option<R>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id=$1;",
            R::COLUMNS.join(","),
            R::TABLE
        );

        Ok(sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    /// Merges `patch` into the stored record and rewrites the full row.
    /// Fails with [StoreError::NotFound] when the id is absent.
    pub async fn update<R: StoreRecord>(&self, id: &str, patch: R::Patch) -> StoreResult<R> {
        let Some(mut record) = self.get::<R>(id).await? else {
            return Err(StoreError::NotFound {
                table: R::TABLE,
                id: id.to_string(),
            });
        };

        record.apply_patch(patch);

        let sql = Self::update_sql::<R>();
        record
            .bind_columns(sqlx::query(&sql))
            .execute(&self.db_pool)
            .await?;

        Ok(record)
    }

    /// Deleting an absent id is a no-op, not an error.
    pub async fn delete<R: StoreRecord>(&self, id: &str) -> StoreResult<()> {
        sqlx::query(&format!("DELETE FROM {} WHERE id=$1;", R::TABLE))
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(())
    }

    /// All records whose indexed column equals `value`, in storage order.
    pub async fn query_by_index<R, V>(&self, column: &str, value: V) -> StoreResult<Vec<R>>
    where
        R: StoreRecord,
        V: Send + for<'q> sqlx::Encode<'q, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite> + 'static,
    {
        Self::check_indexed::<R>(column)?;

        let sql = format!(
            "SELECT {} FROM {} WHERE {column}=$1;",
            R::COLUMNS.join(","),
            R::TABLE
        );

        Ok(sqlx::query_as::<_, R>(&sql)
            .bind(value)
            .fetch_all(&self.db_pool)
            .await?)
    }

    /// Deletes every record whose indexed column equals `value` and
    /// returns the removed-row count.
    pub async fn delete_by_index<R, V>(&self, column: &str, value: V) -> StoreResult<u64>
    where
        R: StoreRecord,
        V: Send + for<'q> sqlx::Encode<'q, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite> + 'static,
    {
        Self::check_indexed::<R>(column)?;

        Ok(sqlx::query(&format!("DELETE FROM {} WHERE {column}=$1;", R::TABLE))
            .bind(value)
            .execute(&self.db_pool)
            .await?
            .rows_affected())
    }

    /// Removes the child rows a [CascadeRule] names for one parent id.
    pub async fn delete_children(
        &self,
        (table, column): CascadeRule,
        parent_id: &str,
    ) -> StoreResult<u64> {
        Ok(sqlx::query(&format!("DELETE FROM {table} WHERE {column}=$1;"))
            .bind(parent_id)
            .execute(&self.db_pool)
            .await?
            .rows_affected())
    }

    /// Every record of a kind, in storage order.
    pub async fn list_all<R: StoreRecord>(&self) -> StoreResult<Vec<R>> {
        let sql = format!("SELECT {} FROM {};", R::COLUMNS.join(","), R::TABLE);

        Ok(sqlx::query_as::<_, R>(&sql).fetch_all(&self.db_pool).await?)
    }
}

impl StoreRecord for models::pet::Pet {
    const TABLE: &'static str = "pets";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "species",
        "breed",
        "birth_date",
        "photo",
        "color",
        "gender",
        "weight",
        "microchip_number",
        "notes",
        "created_at",
        "updated_at",
    ];
    const INDEXED: &'static [&'static str] =
        &["id", "name", "species", "birth_date", "created_at"];
    const CASCADES: &'static [CascadeRule] =
        &[("medical_events", "pet_id"), ("reminders", "pet_id")];

    type Patch = models::pet::PetPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(species) = patch.species {
            self.species = species;
        }
        if let Some(breed) = patch.breed {
            self.breed = breed;
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(photo) = patch.photo {
            self.photo = photo;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(microchip_number) = patch.microchip_number {
            self.microchip_number = microchip_number;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.id.clone())
            .bind(self.name.clone())
            .bind(self.species)
            .bind(self.breed.clone())
            .bind(self.birth_date)
            .bind(self.photo.clone())
            .bind(self.color.clone())
            .bind(self.gender)
            .bind(self.weight)
            .bind(self.microchip_number.clone())
            .bind(self.notes.clone())
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl FromRow<'_, SqliteRow> for models::medical_event::MedicalEvent {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let attachments = match row.try_get::<Option<String>, &str>("attachments")? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|err| sqlx::Error::ColumnDecode {
                    index: "attachments".into(),
                    source: Box::new(err),
                })?
            }
            None => Vec::new(),
        };

        let cost = row
            .try_get::<Option<String>, &str>("cost")?
            .map(|raw| raw.parse::<Decimal>())
            .transpose()
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: "cost".into(),
                source: Box::new(err),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            event_type: row.try_get("event_type")?,
            title: row.try_get("title")?,
            date: row.try_get("date")?,
            description: row.try_get("description")?,
            veterinarian: row.try_get("veterinarian")?,
            clinic: row.try_get("clinic")?,
            cost,
            attachments,
            next_appointment: row.try_get("next_appointment")?,
            reminder_enabled: row.try_get("reminder_enabled")?,
            reminder_date: row.try_get("reminder_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl StoreRecord for models::medical_event::MedicalEvent {
    const TABLE: &'static str = "medical_events";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "pet_id",
        "event_type",
        "title",
        "date",
        "description",
        "veterinarian",
        "clinic",
        "cost",
        "attachments",
        "next_appointment",
        "reminder_enabled",
        "reminder_date",
        "created_at",
        "updated_at",
    ];
    const INDEXED: &'static [&'static str] =
        &["id", "pet_id", "event_type", "date", "created_at"];

    type Patch = models::medical_event::MedicalEventPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(event_type) = patch.event_type {
            self.event_type = event_type;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(veterinarian) = patch.veterinarian {
            self.veterinarian = veterinarian;
        }
        if let Some(clinic) = patch.clinic {
            self.clinic = clinic;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        if let Some(attachments) = patch.attachments {
            self.attachments = attachments;
        }
        if let Some(next_appointment) = patch.next_appointment {
            self.next_appointment = next_appointment;
        }
        if let Some(reminder_enabled) = patch.reminder_enabled {
            self.reminder_enabled = reminder_enabled;
        }
        if let Some(reminder_date) = patch.reminder_date {
            self.reminder_date = reminder_date;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        let attachments = if self.attachments.is_empty() {
            None
        } else {
            serde_json::to_string(&self.attachments).ok()
        };

        query
            .bind(self.id.clone())
            .bind(self.pet_id.clone())
            .bind(self.event_type)
            .bind(self.title.clone())
            .bind(self.date)
            .bind(self.description.clone())
            .bind(self.veterinarian.clone())
            .bind(self.clinic.clone())
            .bind(self.cost.map(|cost| cost.to_string()))
            .bind(attachments)
            .bind(self.next_appointment)
            .bind(self.reminder_enabled)
            .bind(self.reminder_date)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl FromRow<'_, SqliteRow> for models::reminder::Reminder {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let recurring = row
            .try_get::<Option<String>, &str>("recurring")?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: "recurring".into(),
                source: Box::new(err),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            event_id: row.try_get("event_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            due_date: row.try_get("due_date")?,
            reminder_type: row.try_get("reminder_type")?,
            completed: row.try_get("completed")?,
            completed_at: row.try_get("completed_at")?,
            recurring,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl StoreRecord for models::reminder::Reminder {
    const TABLE: &'static str = "reminders";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "pet_id",
        "event_id",
        "title",
        "description",
        "due_date",
        "reminder_type",
        "completed",
        "completed_at",
        "recurring",
        "created_at",
        "updated_at",
    ];
    const INDEXED: &'static [&'static str] = &[
        "id",
        "pet_id",
        "event_id",
        "due_date",
        "completed",
        "reminder_type",
    ];

    type Patch = models::reminder::ReminderPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(event_id) = patch.event_id {
            self.event_id = event_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(reminder_type) = patch.reminder_type {
            self.reminder_type = reminder_type;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = completed_at;
        }
        if let Some(recurring) = patch.recurring {
            self.recurring = recurring;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        let recurring = self
            .recurring
            .as_ref()
            .and_then(|rule| serde_json::to_string(rule).ok());

        query
            .bind(self.id.clone())
            .bind(self.pet_id.clone())
            .bind(self.event_id.clone())
            .bind(self.title.clone())
            .bind(self.description.clone())
            .bind(self.due_date)
            .bind(self.reminder_type)
            .bind(self.completed)
            .bind(self.completed_at)
            .bind(recurring)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl StoreRecord for models::settings::AppSettings {
    const TABLE: &'static str = "settings";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "theme",
        "notifications",
        "reminder_days_before",
        "currency",
        "language",
    ];
    const INDEXED: &'static [&'static str] = &["id"];

    type Patch = models::settings::SettingsPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(notifications) = patch.notifications {
            self.notifications = notifications;
        }
        if let Some(reminder_days_before) = patch.reminder_days_before {
            self.reminder_days_before = reminder_days_before;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.id.clone())
            .bind(self.theme)
            .bind(self.notifications)
            .bind(self.reminder_days_before)
            .bind(self.currency.clone())
            .bind(self.language.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::medical_event::{Attachment, MedicalEvent, MedicalEventType, NewMedicalEvent};
    use crate::models::pet::{NewPet, Pet, PetPatch, PetSpecies};
    use crate::models::reminder::{NewReminder, Reminder, ReminderType};
    use base64::Engine;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    async fn memory_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    fn create_test_pet(name: &str) -> Pet {
        Pet::create(
            NewPet {
                name: name.to_string(),
                species: PetSpecies::Dog,
                breed: "mixed".to_string(),
                birth_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    fn create_test_event(pet_id: &str, title: &str) -> MedicalEvent {
        MedicalEvent::create(
            NewMedicalEvent {
                pet_id: pet_id.to_string(),
                event_type: MedicalEventType::Vaccination,
                title: title.to_string(),
                date: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
                cost: Some(dec!(49.90)),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    fn create_test_reminder(pet_id: &str, title: &str) -> Reminder {
        Reminder::create(
            NewReminder {
                pet_id: pet_id.to_string(),
                title: title.to_string(),
                due_date: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
                reminder_type: ReminderType::Vaccination,
                ..Default::default()
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_add_and_get_roundtrip() {
        let store = memory_store().await;
        let pet = create_test_pet("Rex");

        store.add(&pet).await.unwrap();

        let stored = store.get::<Pet>(&pet.id).await.unwrap().unwrap();
        assert_eq!(stored, pet);
    }

    #[tokio::test]
    async fn test_add_duplicate_id_fails() {
        let store = memory_store().await;
        let pet = create_test_pet("Rex");

        store.add(&pet).await.unwrap();
        let err = store.add(&pet).await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateKey { table: "pets", .. }));
    }

    #[tokio::test]
    async fn test_event_json_and_cost_columns_roundtrip() {
        let store = memory_store().await;
        let mut event = create_test_event("pet-1", "Rabies");
        event.attachments = vec![
            Attachment::new(
                "card.pdf",
                base64::engine::general_purpose::STANDARD.encode(b"card"),
                Utc::now(),
            )
            .unwrap(),
        ];

        store.add(&event).await.unwrap();

        let stored = store.get::<MedicalEvent>(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.cost, Some(dec!(49.90)));
        assert_eq!(stored.attachments, event.attachments);
    }

    #[tokio::test]
    async fn test_update_merges_patch_and_keeps_other_fields() {
        let store = memory_store().await;
        let pet = create_test_pet("Rex");
        store.add(&pet).await.unwrap();

        let updated = store
            .update::<Pet>(
                &pet.id,
                PetPatch {
                    name: Some("Max".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Max");
        assert_eq!(updated.species, pet.species);
        assert_eq!(updated.birth_date, pet.birth_date);
        assert_eq!(updated.created_at, pet.created_at);
    }

    #[tokio::test]
    async fn test_update_clears_optional_field_with_explicit_none() {
        let store = memory_store().await;
        let mut pet = create_test_pet("Rex");
        pet.notes = Some("bites the vet".to_string());
        store.add(&pet).await.unwrap();

        let updated = store
            .update::<Pet>(
                &pet.id,
                PetPatch {
                    notes: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.notes, None);
        let stored = store.get::<Pet>(&pet.id).await.unwrap().unwrap();
        assert_eq!(stored.notes, None);
    }

    #[tokio::test]
    async fn test_update_missing_id_fails_with_not_found() {
        let store = memory_store().await;

        let err = store
            .update::<Pet>("nope", PetPatch::default())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { table: "pets", .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = memory_store().await;
        let reminder = create_test_reminder("pet-1", "Rabies booster");
        store.add(&reminder).await.unwrap();

        store.delete::<Reminder>(&reminder.id).await.unwrap();
        store.delete::<Reminder>(&reminder.id).await.unwrap();

        assert!(store.get::<Reminder>(&reminder.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_by_index_filters_on_column() {
        let store = memory_store().await;
        store.add(&create_test_event("pet-1", "Rabies")).await.unwrap();
        store.add(&create_test_event("pet-1", "Checkup")).await.unwrap();
        store.add(&create_test_event("pet-2", "Surgery")).await.unwrap();

        let events = store
            .query_by_index::<MedicalEvent, _>("pet_id", "pet-1".to_string())
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| event.pet_id == "pet-1"));
    }

    #[tokio::test]
    async fn test_query_by_index_rejects_unindexed_column() {
        let store = memory_store().await;

        let err = store
            .query_by_index::<MedicalEvent, _>("veterinarian", "Dr. Lopez".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::UnknownIndex { .. }));
    }

    #[tokio::test]
    async fn test_delete_by_index_reports_removed_count() {
        let store = memory_store().await;
        store.add(&create_test_reminder("pet-1", "a")).await.unwrap();
        store.add(&create_test_reminder("pet-1", "b")).await.unwrap();
        store.add(&create_test_reminder("pet-2", "c")).await.unwrap();

        let removed = store
            .delete_by_index::<Reminder, _>("pet_id", "pet-1".to_string())
            .await
            .unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.list_all::<Reminder>().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let store = memory_store().await;
        store.migrate().await.unwrap();

        store.add(&create_test_pet("Rex")).await.unwrap();
        store.migrate().await.unwrap();

        assert_eq!(store.list_all::<Pet>().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("pets.db").display());

        let pet = create_test_pet("Rex");
        {
            let store = SqliteStore::connect(&url).await.unwrap();
            store.migrate().await.unwrap();
            store.add(&pet).await.unwrap();
            store.db_pool.close().await;
        }

        let reopened = SqliteStore::connect(&url).await.unwrap();
        let stored = reopened.get::<Pet>(&pet.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Rex");
    }
}
