use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS investors (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name       TEXT NOT NULL,
            email           TEXT NOT NULL UNIQUE,
            gender          TEXT,
            phone           TEXT,
            password_hash   TEXT NOT NULL,
            profile_image   TEXT,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS companies (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            tax_id          TEXT NOT NULL UNIQUE,
            trade_name      TEXT NOT NULL,
            legal_name      TEXT NOT NULL,
            street          TEXT,
            street_number   TEXT,
            unit            TEXT,
            city            TEXT,
            state           TEXT,
            postal_code     TEXT,
            email           TEXT NOT NULL UNIQUE,
            password_hash   TEXT NOT NULL,
            profile_image   TEXT,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- One connection per (investor, company) pair, enforced by the store.
        CREATE TABLE IF NOT EXISTS connections (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            investor_id     INTEGER NOT NULL REFERENCES investors(id),
            company_id      INTEGER NOT NULL REFERENCES companies(id),
            status          TEXT NOT NULL DEFAULT 'pending',
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(investor_id, company_id)
        );

        CREATE INDEX IF NOT EXISTS idx_connections_investor
            ON connections(investor_id);
        CREATE INDEX IF NOT EXISTS idx_connections_company
            ON connections(company_id);

        CREATE TABLE IF NOT EXISTS notifications (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            recipient_id    INTEGER NOT NULL,
            recipient_kind  TEXT NOT NULL,
            title           TEXT NOT NULL,
            body            TEXT NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            read            INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_notifications_recipient
            ON notifications(recipient_id, recipient_kind);

        CREATE TABLE IF NOT EXISTS messages (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            sender_id       INTEGER NOT NULL,
            sender_kind     TEXT NOT NULL,
            recipient_id    INTEGER NOT NULL,
            recipient_kind  TEXT NOT NULL,
            body            TEXT NOT NULL,
            sent_at         TEXT NOT NULL DEFAULT (datetime('now')),
            read            INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_messages_recipient
            ON messages(recipient_id, recipient_kind);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
