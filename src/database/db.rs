//! Database operations for the card store
//!
//! Handles SQLite database initialization, CRUD operations for categories and cards,
//! SM-2 review data, the review log and the simulated current date.

use crate::error::{Result, ReviewError};
use crate::models::{Card, Grade, Interval, ReviewData};
use crate::session::CardStore;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

const CARD_COLUMNS: &str =
    "c.id, c.category, c.question, c.answer, c.answer_on_top, r.last_grade";

/// Handle to the SQLite card store. Clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    name: String,
}

impl Database {
    /// Opens (or creates) the database file and makes sure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        log::debug!("Opened card store {name} at {}", path.display());
        Self::init(conn, name)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, "memory".to_string())
    }

    /// Creates tables for categories, cards, SM-2 review data, the review log and app state.
    /// Sets current date to now if not already initialized.
    fn init(conn: Connection, name: String) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS categories (
                name TEXT PRIMARY KEY
            );
            CREATE TABLE IF NOT EXISTS cards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                answer_on_top INTEGER NOT NULL DEFAULT 0,
                FOREIGN KEY (category) REFERENCES categories(name)
            );
            CREATE TABLE IF NOT EXISTS review_data (
                card_id INTEGER PRIMARY KEY,
                easiness_factor REAL NOT NULL DEFAULT 2.5,
                interval_days INTEGER NOT NULL DEFAULT 0,
                repetitions INTEGER NOT NULL DEFAULT 0,
                next_review_date INTEGER NOT NULL,
                last_grade INTEGER,
                FOREIGN KEY (card_id) REFERENCES cards(id) ON DELETE CASCADE
            );
            CREATE TABLE IF NOT EXISTS review_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                card_id INTEGER NOT NULL,
                grade INTEGER NOT NULL,
                thinking_time_ms INTEGER NOT NULL,
                interval_days INTEGER NOT NULL,
                reviewed_at INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;

        conn.execute(
            "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
            params![to_timestamp(SystemTime::now()).to_string()],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            name,
        })
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    /// Retrieves current simulated date
    pub fn current_date(&self) -> Result<SystemTime> {
        current_date(&self.acquire())
    }

    /// Advances current date by 24 hours, making tomorrow's cards due.
    pub fn advance_day(&self) -> Result<()> {
        let conn = self.acquire();
        let next_day = current_date(&conn)? + Duration::from_secs(SECONDS_PER_DAY);
        conn.execute(
            "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
            params![to_timestamp(next_day).to_string()],
        )?;
        log::debug!("Advanced current date by one day");
        Ok(())
    }

    /// Adds a card and initializes its SM-2 review data so it is due today.
    ///
    /// The category is created if it does not exist yet. Returns the card ID.
    pub fn add_card(
        &self,
        category: &str,
        question: &str,
        answer: &str,
        answer_on_top: bool,
    ) -> Result<i64> {
        let mut conn = self.acquire();
        let today = to_timestamp(current_date(&conn)?);
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
            params![category],
        )?;
        tx.execute(
            "INSERT INTO cards (category, question, answer, answer_on_top) VALUES (?1, ?2, ?3, ?4)",
            params![category, question, answer, answer_on_top],
        )?;
        let card_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO review_data (card_id, easiness_factor, interval_days, repetitions, next_review_date)
             VALUES (?1, 2.5, 0, 0, ?2)",
            params![card_id, today],
        )?;
        tx.commit()?;
        log::debug!("Added card {card_id} to category '{category}'");
        Ok(card_id)
    }

    pub fn update_card_text(&self, card_id: i64, question: &str, answer: &str) -> Result<()> {
        let updated = self.acquire().execute(
            "UPDATE cards SET question = ?1, answer = ?2 WHERE id = ?3",
            params![question, answer, card_id],
        )?;
        if updated == 0 {
            return Err(ReviewError::CardNotFound(card_id));
        }
        log::debug!("Updated text of card {card_id}");
        Ok(())
    }

    /// Deletes a card together with its review data and review history.
    pub fn delete_card(&self, card_id: i64) -> Result<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM review_data WHERE card_id = ?1", params![card_id])?;
        tx.execute("DELETE FROM review_log WHERE card_id = ?1", params![card_id])?;
        let deleted = tx.execute("DELETE FROM cards WHERE id = ?1", params![card_id])?;
        if deleted == 0 {
            return Err(ReviewError::CardNotFound(card_id));
        }
        tx.commit()?;
        log::debug!("Deleted card {card_id}");
        Ok(())
    }

    pub fn card(&self, card_id: i64) -> Result<Option<Card>> {
        let conn = self.acquire();
        let card = conn
            .query_row(
                &format!(
                    "SELECT {CARD_COLUMNS} FROM cards c
                     JOIN review_data r ON c.id = r.card_id
                     WHERE c.id = ?1"
                ),
                params![card_id],
                card_from_row,
            )
            .optional()?;
        Ok(card)
    }

    /// Loads every card, ordered by category then insertion order.
    pub fn all_cards(&self) -> Result<Vec<Card>> {
        let conn = self.acquire();
        let mut stmt = conn.prepare(&format!(
            "SELECT {CARD_COLUMNS} FROM cards c
             JOIN review_data r ON c.id = r.card_id
             ORDER BY c.category ASC, c.id ASC"
        ))?;
        let cards = stmt
            .query_map([], card_from_row)?
            .collect::<rusqlite::Result<Vec<Card>>>()?;
        Ok(cards)
    }

    pub fn count_cards(&self) -> Result<usize> {
        let count: i64 = self
            .acquire()
            .query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Number of cards whose next_review_date <= current_date.
    pub fn due_count(&self) -> Result<usize> {
        let conn = self.acquire();
        let today = to_timestamp(current_date(&conn)?);
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM review_data WHERE next_review_date <= ?1",
            params![today],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Retrieves the most overdue card, ordered by next_review_date (oldest first).
    ///
    /// When `avoid` names a card and another card is also due, the other card wins.
    pub fn next_due_card(&self, avoid: Option<i64>) -> Result<Option<Card>> {
        let conn = self.acquire();
        let today = to_timestamp(current_date(&conn)?);
        let card = conn
            .query_row(
                &format!(
                    "SELECT {CARD_COLUMNS} FROM cards c
                     JOIN review_data r ON c.id = r.card_id
                     WHERE r.next_review_date <= ?1
                     ORDER BY (c.id IS ?2) ASC, r.next_review_date ASC, c.id ASC
                     LIMIT 1"
                ),
                params![today, avoid],
                card_from_row,
            )
            .optional()?;
        Ok(card)
    }

    /// Retrieves the card that becomes due soonest among cards not yet due.
    pub fn upcoming_card(&self) -> Result<Option<Card>> {
        let conn = self.acquire();
        let today = to_timestamp(current_date(&conn)?);
        let card = conn
            .query_row(
                &format!(
                    "SELECT {CARD_COLUMNS} FROM cards c
                     JOIN review_data r ON c.id = r.card_id
                     WHERE r.next_review_date > ?1
                     ORDER BY r.next_review_date ASC, c.id ASC
                     LIMIT 1"
                ),
                params![today],
                card_from_row,
            )
            .optional()?;
        Ok(card)
    }

    pub fn review_data(&self, card_id: i64) -> Result<ReviewData> {
        let conn = self.acquire();
        conn.query_row(
            "SELECT card_id, easiness_factor, interval_days, repetitions, next_review_date, last_grade
             FROM review_data WHERE card_id = ?1",
            params![card_id],
            |row| {
                Ok(ReviewData {
                    card_id: row.get(0)?,
                    easiness_factor: row.get(1)?,
                    interval_days: row.get(2)?,
                    repetitions: row.get(3)?,
                    next_review_date: from_timestamp(row.get(4)?),
                    last_grade: grade_from_column(row.get(5)?),
                })
            },
        )
        .optional()?
        .ok_or(ReviewError::CardNotFound(card_id))
    }

    /// Updates SM-2 review data for a card after it was graded
    pub fn update_review_data(&self, review_data: &ReviewData) -> Result<()> {
        self.acquire().execute(
            "UPDATE review_data
             SET easiness_factor = ?1, interval_days = ?2, repetitions = ?3, next_review_date = ?4, last_grade = ?5
             WHERE card_id = ?6",
            params![
                review_data.easiness_factor,
                review_data.interval_days,
                review_data.repetitions,
                to_timestamp(review_data.next_review_date),
                review_data.last_grade.map(Grade::value),
                review_data.card_id
            ],
        )?;
        Ok(())
    }

    /// Appends a row to the review history.
    pub fn log_review(
        &self,
        card_id: i64,
        grade: Grade,
        thinking_time: Duration,
        interval: Interval,
    ) -> Result<()> {
        self.acquire().execute(
            "INSERT INTO review_log (card_id, grade, thinking_time_ms, interval_days, reviewed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                card_id,
                grade.value(),
                thinking_time.as_millis() as i64,
                interval.days(),
                to_timestamp(SystemTime::now())
            ],
        )?;
        Ok(())
    }

    pub fn review_count(&self) -> Result<usize> {
        let count: i64 = self
            .acquire()
            .query_row("SELECT COUNT(*) FROM review_log", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Think time recorded for the most recent review of a card.
    pub fn last_thinking_time(&self, card_id: i64) -> Result<Option<Duration>> {
        let millis: Option<i64> = self
            .acquire()
            .query_row(
                "SELECT thinking_time_ms FROM review_log WHERE card_id = ?1 ORDER BY id DESC LIMIT 1",
                params![card_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(millis.map(|ms| Duration::from_millis(ms.max(0) as u64)))
    }
}

impl CardStore for Database {
    fn card_count(&self) -> Result<usize> {
        self.count_cards()
    }

    fn store_name(&self) -> String {
        self.name.clone()
    }
}

fn current_date(conn: &Connection) -> Result<SystemTime> {
    let timestamp: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;
    let secs = timestamp
        .parse::<i64>()
        .map_err(|_| ReviewError::CorruptAppState {
            key: "current_date",
            value: timestamp.clone(),
        })?;
    Ok(from_timestamp(secs))
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        category: row.get(1)?,
        question: row.get(2)?,
        answer: row.get(3)?,
        answer_on_top: row.get(4)?,
        last_grade: grade_from_column(row.get(5)?),
    })
}

fn grade_from_column(value: Option<u8>) -> Option<Grade> {
    value.and_then(|value| Grade::new(value).ok())
}

fn to_timestamp(time: SystemTime) -> i64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

fn from_timestamp(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}
