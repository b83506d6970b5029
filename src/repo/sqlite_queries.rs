pub const CREATE_TABLE_PETS: &str = r#"
CREATE TABLE IF NOT EXISTS pets (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    species TEXT NOT NULL,
    breed TEXT NOT NULL DEFAULT '',
    birth_date DATE NOT NULL,
    photo TEXT,
    color TEXT,
    gender TEXT,
    weight REAL,
    microchip_number TEXT,
    notes TEXT,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

pub const CREATE_TABLE_MEDICAL_EVENTS: &str = r#"
CREATE TABLE IF NOT EXISTS medical_events (
    id TEXT PRIMARY KEY,
    pet_id TEXT NOT NULL,
    event_type TEXT NOT NULL,
    title TEXT NOT NULL,
    date DATETIME NOT NULL,
    description TEXT,
    veterinarian TEXT,
    clinic TEXT,
    cost TEXT,
    attachments TEXT,
    next_appointment DATETIME,
    reminder_enabled INTEGER,
    reminder_date DATETIME,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

pub const CREATE_TABLE_REMINDERS: &str = r#"
CREATE TABLE IF NOT EXISTS reminders (
    id TEXT PRIMARY KEY,
    pet_id TEXT NOT NULL,
    event_id TEXT,
    title TEXT NOT NULL,
    description TEXT,
    due_date DATETIME NOT NULL,
    reminder_type TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    completed_at DATETIME,
    recurring TEXT,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

pub const CREATE_TABLE_SETTINGS: &str = r#"
CREATE TABLE IF NOT EXISTS settings (
    id TEXT PRIMARY KEY,
    theme TEXT NOT NULL,
    notifications INTEGER NOT NULL,
    reminder_days_before INTEGER NOT NULL,
    currency TEXT NOT NULL,
    language TEXT NOT NULL
);
"#;

pub const CREATE_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_pets_name ON pets (name);
CREATE INDEX IF NOT EXISTS idx_pets_species ON pets (species);
CREATE INDEX IF NOT EXISTS idx_pets_birth_date ON pets (birth_date);
CREATE INDEX IF NOT EXISTS idx_pets_created_at ON pets (created_at);
CREATE INDEX IF NOT EXISTS idx_medical_events_pet_id ON medical_events (pet_id);
CREATE INDEX IF NOT EXISTS idx_medical_events_event_type ON medical_events (event_type);
CREATE INDEX IF NOT EXISTS idx_medical_events_date ON medical_events (date);
CREATE INDEX IF NOT EXISTS idx_medical_events_created_at ON medical_events (created_at);
CREATE INDEX IF NOT EXISTS idx_reminders_pet_id ON reminders (pet_id);
CREATE INDEX IF NOT EXISTS idx_reminders_event_id ON reminders (event_id);
CREATE INDEX IF NOT EXISTS idx_reminders_due_date ON reminders (due_date);
CREATE INDEX IF NOT EXISTS idx_reminders_completed ON reminders (completed);
CREATE INDEX IF NOT EXISTS idx_reminders_reminder_type ON reminders (reminder_type);
"#;

/// Every schema statement, in creation order.
pub const SCHEMA: &[&str] = &[
    CREATE_TABLE_PETS,
    CREATE_TABLE_MEDICAL_EVENTS,
    CREATE_TABLE_REMINDERS,
    CREATE_TABLE_SETTINGS,
    CREATE_INDEXES,
];
