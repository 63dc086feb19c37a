//! SQL schema for the intake SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS` and
/// `INSERT OR IGNORE` for the built-in lookup rows.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS records (
    record_id      TEXT PRIMARY KEY,
    student_number TEXT NOT NULL UNIQUE,
    status         TEXT NOT NULL,   -- 'draft' | 'finalized'
    created_at     TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at     TEXT NOT NULL
);

-- Address value objects. No record_id: rows are referenced by id from
-- record_addresses, related_persons, and emergency_contacts. Replacing a
-- referrer leaves the address row behind (independent lifecycle).
CREATE TABLE IF NOT EXISTS addresses (
    address_id  TEXT PRIMARY KEY,
    line1       TEXT NOT NULL,
    line2       TEXT,
    city        TEXT NOT NULL,
    region      TEXT,
    postal_code TEXT,
    country     TEXT
);

-- ── 1:1 children — UNIQUE(record_id) makes the upsert conflict target ──

CREATE TABLE IF NOT EXISTS personal_info (
    personal_info_id TEXT PRIMARY KEY,
    record_id        TEXT NOT NULL UNIQUE REFERENCES records(record_id),
    family_name      TEXT NOT NULL,
    given_name       TEXT NOT NULL,
    kana             TEXT,
    birth_date       TEXT NOT NULL,   -- ISO 8601 date
    gender_code      TEXT,
    religion_code    TEXT,
    nationality      TEXT,
    phone            TEXT,
    email            TEXT,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS family_background (
    family_background_id       TEXT PRIMARY KEY,
    record_id                  TEXT NOT NULL UNIQUE REFERENCES records(record_id),
    guardian_name              TEXT NOT NULL,
    guardian_relationship_code TEXT,
    father_alive               INTEGER NOT NULL,
    mother_alive               INTEGER NOT NULL,
    sibling_count              INTEGER NOT NULL,
    household_notes            TEXT,
    created_at                 TEXT NOT NULL,
    updated_at                 TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS educational_background (
    educational_background_id TEXT PRIMARY KEY,
    record_id                 TEXT NOT NULL UNIQUE REFERENCES records(record_id),
    previous_school           TEXT NOT NULL,
    graduated_on              TEXT,
    admission_type_code       TEXT,
    course_code               TEXT,
    notes                     TEXT,
    created_at                TEXT NOT NULL,
    updated_at                TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS health_records (
    health_record_id   TEXT PRIMARY KEY,
    record_id          TEXT NOT NULL UNIQUE REFERENCES records(record_id),
    blood_type_code    TEXT,
    allergies          TEXT,
    chronic_conditions TEXT,
    physician          TEXT,
    notes              TEXT,
    created_at         TEXT NOT NULL,
    updated_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS finance_records (
    finance_record_id  TEXT PRIMARY KEY,
    record_id          TEXT NOT NULL UNIQUE REFERENCES records(record_id),
    tuition_payer_code TEXT,
    monthly_allowance  INTEGER,
    scholarship        TEXT,
    part_time_job      INTEGER NOT NULL,
    created_at         TEXT NOT NULL,
    updated_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS emergency_contacts (
    emergency_contact_id TEXT PRIMARY KEY,
    record_id            TEXT NOT NULL UNIQUE REFERENCES records(record_id),
    name                 TEXT NOT NULL,
    relationship_code    TEXT NOT NULL,
    phone                TEXT NOT NULL,
    address_id           TEXT REFERENCES addresses(address_id),
    created_at           TEXT NOT NULL,
    updated_at           TEXT NOT NULL
);

-- ── 1:N children — non-unique record_id, replaced wholesale on write ──

CREATE TABLE IF NOT EXISTS record_addresses (
    record_address_id TEXT PRIMARY KEY,
    record_id         TEXT NOT NULL REFERENCES records(record_id),
    address_id        TEXT NOT NULL REFERENCES addresses(address_id),
    kind_code         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS related_persons (
    related_person_id TEXT PRIMARY KEY,
    record_id         TEXT NOT NULL REFERENCES records(record_id),
    name              TEXT NOT NULL,
    relationship_code TEXT NOT NULL,
    birth_year        INTEGER,
    occupation        TEXT,
    cohabiting        INTEGER NOT NULL,
    address_id        TEXT REFERENCES addresses(address_id),
    phone             TEXT
);

CREATE TABLE IF NOT EXISTS school_details (
    school_detail_id TEXT PRIMARY KEY,
    record_id        TEXT NOT NULL REFERENCES records(record_id),
    school_name      TEXT NOT NULL,
    kind_code        TEXT NOT NULL,
    entered_on       TEXT,
    left_on          TEXT,
    notes            TEXT
);

CREATE TABLE IF NOT EXISTS consultations (
    consultation_id TEXT PRIMARY KEY,
    record_id       TEXT NOT NULL REFERENCES records(record_id),
    held_on         TEXT NOT NULL,
    counselor       TEXT NOT NULL,
    topic           TEXT,
    summary         TEXT
);

CREATE TABLE IF NOT EXISTS test_results (
    test_result_id TEXT PRIMARY KEY,
    record_id      TEXT NOT NULL REFERENCES records(record_id),
    test_name      TEXT NOT NULL,
    taken_on       TEXT,
    score          INTEGER NOT NULL,
    max_score      INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS activities (
    activity_id TEXT PRIMARY KEY,
    record_id   TEXT NOT NULL REFERENCES records(record_id),
    name        TEXT NOT NULL,
    kind_code   TEXT,
    role        TEXT,
    joined_on   TEXT
);

CREATE TABLE IF NOT EXISTS subject_preferences (
    subject_preference_id TEXT PRIMARY KEY,
    record_id             TEXT NOT NULL REFERENCES records(record_id),
    subject               TEXT NOT NULL,
    liked                 INTEGER NOT NULL,
    reason                TEXT
);

CREATE TABLE IF NOT EXISTS hobbies (
    hobby_id  TEXT PRIMARY KEY,
    record_id TEXT NOT NULL REFERENCES records(record_id),
    name      TEXT NOT NULL,
    notes     TEXT
);

CREATE TABLE IF NOT EXISTS significant_notes (
    significant_note_id TEXT PRIMARY KEY,
    record_id           TEXT NOT NULL REFERENCES records(record_id),
    noted_on            TEXT NOT NULL,
    category_code       TEXT,
    body                TEXT NOT NULL
);

-- ── Junctions — the pair is the whole payload ──

CREATE TABLE IF NOT EXISTS sibling_support (
    family_background_id TEXT NOT NULL REFERENCES family_background(family_background_id),
    support_code         TEXT NOT NULL,
    PRIMARY KEY (family_background_id, support_code)
);

CREATE TABLE IF NOT EXISTS financial_support (
    finance_record_id TEXT NOT NULL REFERENCES finance_records(finance_record_id),
    support_code      TEXT NOT NULL,
    PRIMARY KEY (finance_record_id, support_code)
);

-- ── Lookups ──

CREATE TABLE IF NOT EXISTS lookups (
    domain TEXT NOT NULL,
    code   TEXT NOT NULL,
    label  TEXT NOT NULL,
    PRIMARY KEY (domain, code)
);

CREATE INDEX IF NOT EXISTS record_addresses_record_idx   ON record_addresses(record_id);
CREATE INDEX IF NOT EXISTS related_persons_record_idx    ON related_persons(record_id);
CREATE INDEX IF NOT EXISTS school_details_record_idx     ON school_details(record_id);
CREATE INDEX IF NOT EXISTS consultations_record_idx      ON consultations(record_id);
CREATE INDEX IF NOT EXISTS test_results_record_idx       ON test_results(record_id);
CREATE INDEX IF NOT EXISTS activities_record_idx         ON activities(record_id);
CREATE INDEX IF NOT EXISTS subject_preferences_record_idx ON subject_preferences(record_id);
CREATE INDEX IF NOT EXISTS hobbies_record_idx            ON hobbies(record_id);
CREATE INDEX IF NOT EXISTS significant_notes_record_idx  ON significant_notes(record_id);

-- Built-in lookup rows. INSERT OR IGNORE keeps re-runs idempotent and
-- preserves operator edits to labels.
INSERT OR IGNORE INTO lookups (domain, code, label) VALUES
    ('gender', 'f', 'Female'),
    ('gender', 'm', 'Male'),
    ('gender', 'x', 'Non-binary'),
    ('religion', 'none', 'None'),
    ('religion', 'buddhist', 'Buddhist'),
    ('religion', 'christian', 'Christian'),
    ('religion', 'muslim', 'Muslim'),
    ('religion', 'other', 'Other'),
    ('relationship', 'father', 'Father'),
    ('relationship', 'mother', 'Mother'),
    ('relationship', 'grandfather', 'Grandfather'),
    ('relationship', 'grandmother', 'Grandmother'),
    ('relationship', 'sibling', 'Sibling'),
    ('relationship', 'uncle', 'Uncle'),
    ('relationship', 'aunt', 'Aunt'),
    ('relationship', 'guardian', 'Legal guardian'),
    ('relationship', 'other', 'Other'),
    ('admission_type', 'regular', 'Regular examination'),
    ('admission_type', 'recommendation', 'Recommendation'),
    ('admission_type', 'transfer', 'Transfer'),
    ('admission_type', 'returnee', 'Returnee'),
    ('course', 'general', 'General course'),
    ('course', 'science', 'Science course'),
    ('course', 'humanities', 'Humanities course'),
    ('course', 'vocational', 'Vocational course'),
    ('blood_type', 'a', 'Type A'),
    ('blood_type', 'b', 'Type B'),
    ('blood_type', 'o', 'Type O'),
    ('blood_type', 'ab', 'Type AB'),
    ('blood_type', 'unknown', 'Unknown'),
    ('support_type', 'public_assistance', 'Public assistance'),
    ('support_type', 'scholarship', 'Scholarship'),
    ('support_type', 'relative', 'Support from relatives'),
    ('support_type', 'none', 'No support'),
    ('address_kind', 'current', 'Current residence'),
    ('address_kind', 'permanent', 'Permanent domicile'),
    ('address_kind', 'boarding', 'Boarding address'),
    ('school_kind', 'elementary', 'Elementary school'),
    ('school_kind', 'junior_high', 'Junior high school'),
    ('school_kind', 'high', 'High school'),
    ('school_kind', 'other', 'Other institution'),
    ('activity_kind', 'sports', 'Sports'),
    ('activity_kind', 'culture', 'Cultural'),
    ('activity_kind', 'volunteer', 'Volunteer'),
    ('note_category', 'academic', 'Academic'),
    ('note_category', 'behavioral', 'Behavioral'),
    ('note_category', 'family', 'Family'),
    ('note_category', 'health', 'Health'),
    ('tuition_payer', 'father', 'Father'),
    ('tuition_payer', 'mother', 'Mother'),
    ('tuition_payer', 'guardian', 'Guardian'),
    ('tuition_payer', 'self', 'Self-funded'),
    ('tuition_payer', 'scholarship', 'Scholarship');

PRAGMA user_version = 1;
";
