//! # Domain Service Module
//!
//! [PetManagerService] is the single entry point the presentation layer
//! talks to. It keeps an in-memory mirror of every collection, writes
//! mutations through to the store, reloads the mirror after each write,
//! and answers the derived queries the views render from.

use crate::consts;
use crate::models::medical_event::{MedicalEvent, MedicalEventPatch, NewMedicalEvent};
use crate::models::pet::{NewPet, Pet, PetPatch};
use crate::models::reminder::{NewReminder, Reminder, ReminderPatch};
use crate::models::settings::{AppSettings, SettingsPatch};
use crate::repo::{StoreRecord, sqlite::SqliteStore};
use chrono::{DateTime, Utc};
use futures::future::try_join4;

/// Stateful façade over the record store.
///
/// Loaded once at startup. Every mutation goes store-first, then the
/// whole mirror is reloaded before the call returns, so readers always
/// see the last successful refresh. Mutation failures propagate to the
/// caller; refresh failures are logged and the previous mirror stays
/// visible rather than blocking the UI on a spinner.
pub struct PetManagerService {
    store: SqliteStore,
    pets: Vec<Pet>,
    medical_events: Vec<MedicalEvent>,
    reminders: Vec<Reminder>,
    settings: AppSettings,
    loading: bool,
}

impl PetManagerService {
    /// Runs the schema migration, bootstraps the settings singleton and
    /// performs the first mirror refresh.
    pub async fn load(store: SqliteStore) -> anyhow::Result<Self> {
        store.migrate().await?;
        let settings = Self::init_settings(&store).await?;

        let mut service = Self {
            store,
            pets: Vec::new(),
            medical_events: Vec::new(),
            reminders: Vec::new(),
            settings,
            loading: true,
        };
        service.refresh().await;

        Ok(service)
    }

    /// Creates the `"default"` settings row iff absent; an existing row
    /// is never overwritten.
    async fn init_settings(store: &SqliteStore) -> anyhow::Result<AppSettings> {
        if let Some(settings) = store.get::<AppSettings>(consts::SETTINGS_ROW_ID).await? {
            return Ok(settings);
        }

        let settings = AppSettings::default();
        store.add(&settings).await?;

        Ok(settings)
    }

    /// Reloads all four collections from the store concurrently.
    ///
    /// On success every mirror is replaced at once. On failure the
    /// previous mirror is kept and the error only reaches the log; the
    /// service still leaves the loading state so the UI is never stuck
    /// on one failed reload.
    pub async fn refresh(&mut self) {
        self.loading = true;

        let fetched = try_join4(
            self.store.list_all::<Pet>(),
            self.store.list_all::<MedicalEvent>(),
            self.store.list_all::<Reminder>(),
            self.store.get::<AppSettings>(consts::SETTINGS_ROW_ID),
        )
        .await;

        match fetched {
            Ok((pets, medical_events, reminders, settings)) => {
                self.pets = pets;
                self.medical_events = medical_events;
                self.reminders = reminders;
                if let Some(settings) = settings {
                    self.settings = settings;
                }
            }
            Err(err) => log::error!("mirror refresh failed, keeping previous data: {err}"),
        }

        self.loading = false;
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn medical_events(&self) -> &[MedicalEvent] {
        &self.medical_events
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // Pet operations

    pub async fn add_pet(&mut self, data: NewPet) -> anyhow::Result<Pet> {
        let pet = Pet::create(data, Utc::now());
        self.store.add(&pet).await?;
        self.refresh().await;

        Ok(pet)
    }

    pub async fn update_pet(&mut self, id: &str, mut patch: PetPatch) -> anyhow::Result<Pet> {
        patch.updated_at = Some(Utc::now());
        let pet = self.store.update::<Pet>(id, patch).await?;
        self.refresh().await;

        Ok(pet)
    }

    /// Deletes a pet and, best effort, every medical event and reminder
    /// referencing it. The cascades run after the pet delete as separate
    /// statements; a failure in between leaves orphaned child rows.
    pub async fn delete_pet(&mut self, id: &str) -> anyhow::Result<()> {
        self.store.delete::<Pet>(id).await?;

        for rule in Pet::CASCADES {
            self.store.delete_children(*rule, id).await?;
        }
        self.refresh().await;

        Ok(())
    }

    pub fn get_pet_by_id(&self, id: &str) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == id)
    }

    // Medical event operations

    pub async fn add_medical_event(&mut self, data: NewMedicalEvent) -> anyhow::Result<MedicalEvent> {
        let event = MedicalEvent::create(data, Utc::now());
        self.store.add(&event).await?;
        self.refresh().await;

        Ok(event)
    }

    pub async fn update_medical_event(
        &mut self,
        id: &str,
        mut patch: MedicalEventPatch,
    ) -> anyhow::Result<MedicalEvent> {
        patch.updated_at = Some(Utc::now());
        let event = self.store.update::<MedicalEvent>(id, patch).await?;
        self.refresh().await;

        Ok(event)
    }

    pub async fn delete_medical_event(&mut self, id: &str) -> anyhow::Result<()> {
        self.store.delete::<MedicalEvent>(id).await?;
        self.refresh().await;

        Ok(())
    }

    /// Medical history of one pet, most recent event first.
    pub fn get_events_by_pet_id(&self, pet_id: &str) -> Vec<MedicalEvent> {
        let mut events: Vec<_> = self
            .medical_events
            .iter()
            .filter(|event| event.pet_id == pet_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.date.cmp(&a.date));

        events
    }

    // Reminder operations

    pub async fn add_reminder(&mut self, data: NewReminder) -> anyhow::Result<Reminder> {
        let reminder = Reminder::create(data, Utc::now());
        self.store.add(&reminder).await?;
        self.refresh().await;

        Ok(reminder)
    }

    pub async fn update_reminder(
        &mut self,
        id: &str,
        mut patch: ReminderPatch,
    ) -> anyhow::Result<Reminder> {
        patch.updated_at = Some(Utc::now());
        let reminder = self.store.update::<Reminder>(id, patch).await?;
        self.refresh().await;

        Ok(reminder)
    }

    pub async fn delete_reminder(&mut self, id: &str) -> anyhow::Result<()> {
        self.store.delete::<Reminder>(id).await?;
        self.refresh().await;

        Ok(())
    }

    /// Marks a reminder done (stamping `completed_at`) or reopens it
    /// (clearing `completed_at`).
    pub async fn set_reminder_completed(
        &mut self,
        id: &str,
        completed: bool,
    ) -> anyhow::Result<Reminder> {
        self.update_reminder(
            id,
            ReminderPatch {
                completed: Some(completed),
                completed_at: Some(completed.then(Utc::now)),
                ..Default::default()
            },
        )
        .await
    }

    pub fn get_reminders_by_pet_id(&self, pet_id: &str) -> Vec<Reminder> {
        self.reminders
            .iter()
            .filter(|reminder| reminder.pet_id == pet_id)
            .cloned()
            .collect()
    }

    /// Open reminders due at or after `now`, soonest first.
    pub fn upcoming_reminders_at(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        let mut upcoming: Vec<_> = self
            .reminders
            .iter()
            .filter(|reminder| !reminder.completed && reminder.due_date >= now)
            .cloned()
            .collect();
        upcoming.sort_by(|a, b| a.due_date.cmp(&b.due_date));

        upcoming
    }

    pub fn get_upcoming_reminders(&self) -> Vec<Reminder> {
        self.upcoming_reminders_at(Utc::now())
    }

    // Settings operations

    pub async fn update_settings(&mut self, patch: SettingsPatch) -> anyhow::Result<AppSettings> {
        let settings = self
            .store
            .update::<AppSettings>(consts::SETTINGS_ROW_ID, patch)
            .await?;
        self.refresh().await;

        Ok(settings)
    }
}
