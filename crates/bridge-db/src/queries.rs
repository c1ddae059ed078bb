use bridge_types::{AccountKind, ConnectionStatus};
use rusqlite::{Connection, OptionalExtension, params};

use crate::Database;
use crate::error::{Error, is_unique_violation};
use crate::models::{
    CompanyHitRow, CompanyRow, ConnectionRow, ConversationRow, InvestorHitRow, InvestorRow,
    MessageRow, NotificationRow,
};

/// Column list and insert payload for a new investor account. The password
/// arrives already hashed; this layer never sees plaintext.
pub struct NewInvestor<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub gender: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub password_hash: &'a str,
}

pub struct NewCompany<'a> {
    pub tax_id: &'a str,
    pub trade_name: &'a str,
    pub legal_name: &'a str,
    pub street: Option<&'a str>,
    pub street_number: Option<&'a str>,
    pub unit: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub postal_code: Option<&'a str>,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl Database {
    // -- Accounts --

    /// Inserts an investor inside one transaction. The email is checked
    /// against both account tables: addresses are unique across kinds.
    pub fn insert_investor(&self, new: &NewInvestor) -> Result<i64, Error> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if email_taken(&tx, new.email)? {
                return Err(Error::DuplicateIdentity("email"));
            }
            tx.execute(
                "INSERT INTO investors (full_name, email, gender, phone, password_hash)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![new.full_name, new.email, new.gender, new.phone, new.password_hash],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
    }

    pub fn insert_company(&self, new: &NewCompany) -> Result<i64, Error> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let tax_id_taken: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM companies WHERE tax_id = ?1)",
                [new.tax_id],
                |row| row.get(0),
            )?;
            if tax_id_taken {
                return Err(Error::DuplicateIdentity("tax id"));
            }
            if email_taken(&tx, new.email)? {
                return Err(Error::DuplicateIdentity("email"));
            }
            tx.execute(
                "INSERT INTO companies
                 (tax_id, trade_name, legal_name, street, street_number, unit,
                  city, state, postal_code, email, password_hash)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    new.tax_id,
                    new.trade_name,
                    new.legal_name,
                    new.street,
                    new.street_number,
                    new.unit,
                    new.city,
                    new.state,
                    new.postal_code,
                    new.email,
                    new.password_hash,
                ],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
    }

    pub fn investor_by_email(&self, email: &str) -> Result<Option<InvestorRow>, Error> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, full_name, email, gender, phone, password_hash, created_at
                 FROM investors WHERE email = ?1",
            )?;
            let row = stmt
                .query_row([email], |row| {
                    Ok(InvestorRow {
                        id: row.get(0)?,
                        full_name: row.get(1)?,
                        email: row.get(2)?,
                        gender: row.get(3)?,
                        phone: row.get(4)?,
                        password_hash: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                })
                .optional()?;
            Ok(row)
        })
    }

    pub fn company_by_email(&self, email: &str) -> Result<Option<CompanyRow>, Error> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, tax_id, trade_name, legal_name, city, state, email,
                        password_hash, created_at
                 FROM companies WHERE email = ?1",
            )?;
            let row = stmt
                .query_row([email], |row| {
                    Ok(CompanyRow {
                        id: row.get(0)?,
                        tax_id: row.get(1)?,
                        trade_name: row.get(2)?,
                        legal_name: row.get(3)?,
                        city: row.get(4)?,
                        state: row.get(5)?,
                        email: row.get(6)?,
                        password_hash: row.get(7)?,
                        created_at: row.get(8)?,
                    })
                })
                .optional()?;
            Ok(row)
        })
    }

    pub fn password_hash_for(
        &self,
        account_id: i64,
        kind: AccountKind,
    ) -> Result<Option<String>, Error> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT password_hash FROM {} WHERE id = ?1",
                account_table(kind)
            );
            let hash = conn
                .query_row(&sql, [account_id], |row| row.get(0))
                .optional()?;
            Ok(hash)
        })
    }

    pub fn set_password_hash(
        &self,
        account_id: i64,
        kind: AccountKind,
        password_hash: &str,
    ) -> Result<(), Error> {
        self.with_conn_mut(|conn| {
            let sql = format!(
                "UPDATE {} SET password_hash = ?1 WHERE id = ?2",
                account_table(kind)
            );
            let changed = conn.execute(&sql, params![password_hash, account_id])?;
            if changed == 0 {
                return Err(Error::NotFound);
            }
            Ok(())
        })
    }

    /// Removes the account and everything referencing it in one transaction:
    /// connections, messages sent or received, and notifications. Dependents
    /// go first so the foreign keys on connections hold throughout.
    pub fn delete_account(&self, account_id: i64, kind: AccountKind) -> Result<(), Error> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let table = account_table(kind);
            let exists: bool = tx.query_row(
                &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)"),
                [account_id],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(Error::NotFound);
            }
            let side = match kind {
                AccountKind::Investor => "investor_id",
                AccountKind::Company => "company_id",
            };
            tx.execute(
                &format!("DELETE FROM connections WHERE {side} = ?1"),
                [account_id],
            )?;
            tx.execute(
                "DELETE FROM messages
                 WHERE (sender_id = ?1 AND sender_kind = ?2)
                    OR (recipient_id = ?1 AND recipient_kind = ?2)",
                params![account_id, kind.as_str()],
            )?;
            tx.execute(
                "DELETE FROM notifications WHERE recipient_id = ?1 AND recipient_kind = ?2",
                params![account_id, kind.as_str()],
            )?;
            tx.execute(&format!("DELETE FROM {table} WHERE id = ?1"), [account_id])?;
            tx.commit()?;
            Ok(())
        })
    }

    // -- Connections --

    /// Creates a pending connection and its request notification atomically.
    /// The UNIQUE(investor_id, company_id) constraint is the single source of
    /// truth for duplicates, surfaced as [`Error::AlreadyExists`].
    pub fn insert_connection(
        &self,
        investor_id: i64,
        company_id: i64,
        notice_recipient_id: i64,
        notice_recipient_kind: AccountKind,
        notice_title: &str,
        notice_body: &str,
    ) -> Result<i64, Error> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if !account_exists(&tx, investor_id, AccountKind::Investor)?
                || !account_exists(&tx, company_id, AccountKind::Company)?
            {
                return Err(Error::NotFound);
            }
            if let Err(e) = tx.execute(
                "INSERT INTO connections (investor_id, company_id) VALUES (?1, ?2)",
                params![investor_id, company_id],
            ) {
                if is_unique_violation(&e) {
                    return Err(Error::AlreadyExists);
                }
                return Err(e.into());
            }
            let id = tx.last_insert_rowid();
            insert_notification(
                &tx,
                notice_recipient_id,
                notice_recipient_kind,
                notice_title,
                notice_body,
            )?;
            tx.commit()?;
            Ok(id)
        })
    }

    /// Transitions a pending connection to its terminal status and notifies
    /// the investor side, atomically. Already-resolved rows are untouched.
    pub fn resolve_connection(
        &self,
        connection_id: i64,
        new_status: ConnectionStatus,
        notice_title: &str,
        notice_body: &str,
    ) -> Result<(), Error> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let row: Option<(i64, String)> = tx
                .query_row(
                    "SELECT investor_id, status FROM connections WHERE id = ?1",
                    [connection_id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;
            let Some((investor_id, status)) = row else {
                return Err(Error::NotFound);
            };
            if status != ConnectionStatus::Pending.as_str() {
                let current =
                    ConnectionStatus::parse(&status).unwrap_or(ConnectionStatus::Rejected);
                return Err(Error::InvalidTransition(current));
            }
            tx.execute(
                "UPDATE connections SET status = ?1 WHERE id = ?2",
                params![new_status.as_str(), connection_id],
            )?;
            insert_notification(
                &tx,
                investor_id,
                AccountKind::Investor,
                notice_title,
                notice_body,
            )?;
            tx.commit()?;
            Ok(())
        })
    }

    /// All connections involving the account, joined with the counterpart's
    /// name and email in a single query, newest first.
    pub fn connections_for(
        &self,
        account_id: i64,
        kind: AccountKind,
    ) -> Result<Vec<ConnectionRow>, Error> {
        self.with_conn(|conn| {
            let sql = match kind {
                AccountKind::Investor => {
                    "SELECT c.id, co.id, co.trade_name, co.email, c.status, c.created_at
                     FROM connections c
                     JOIN companies co ON co.id = c.company_id
                     WHERE c.investor_id = ?1
                     ORDER BY c.created_at DESC, c.id DESC"
                }
                AccountKind::Company => {
                    "SELECT c.id, u.id, u.full_name, u.email, c.status, c.created_at
                     FROM connections c
                     JOIN investors u ON u.id = c.investor_id
                     WHERE c.company_id = ?1
                     ORDER BY c.created_at DESC, c.id DESC"
                }
            };
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt
                .query_map([account_id], |row| {
                    Ok(ConnectionRow {
                        id: row.get(0)?,
                        counterpart_id: row.get(1)?,
                        counterpart_name: row.get(2)?,
                        counterpart_email: row.get(3)?,
                        status: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn connection_status(
        &self,
        investor_id: i64,
        company_id: i64,
    ) -> Result<Option<String>, Error> {
        self.with_conn(|conn| {
            let status = conn
                .query_row(
                    "SELECT status FROM connections WHERE investor_id = ?1 AND company_id = ?2",
                    params![investor_id, company_id],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(status)
        })
    }

    pub fn accepted_connection_count(
        &self,
        account_id: i64,
        kind: AccountKind,
    ) -> Result<i64, Error> {
        self.with_conn(|conn| {
            let side = match kind {
                AccountKind::Investor => "investor_id",
                AccountKind::Company => "company_id",
            };
            let count = conn.query_row(
                &format!(
                    "SELECT COUNT(*) FROM connections WHERE {side} = ?1 AND status = 'accepted'"
                ),
                [account_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    // -- Notifications --

    pub fn insert_notification(
        &self,
        recipient_id: i64,
        recipient_kind: AccountKind,
        title: &str,
        body: &str,
    ) -> Result<i64, Error> {
        self.with_conn(|conn| {
            insert_notification(conn, recipient_id, recipient_kind, title, body)?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn unread_notification_count(
        &self,
        recipient_id: i64,
        kind: AccountKind,
    ) -> Result<i64, Error> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM notifications
                 WHERE recipient_id = ?1 AND recipient_kind = ?2 AND read = 0",
                params![recipient_id, kind.as_str()],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    pub fn mark_notification_read(&self, notification_id: i64) -> Result<(), Error> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE notifications SET read = 1 WHERE id = ?1",
                [notification_id],
            )?;
            if changed == 0 {
                return Err(Error::NotFound);
            }
            Ok(())
        })
    }

    pub fn notifications_for(
        &self,
        recipient_id: i64,
        kind: AccountKind,
    ) -> Result<Vec<NotificationRow>, Error> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, body, created_at, read FROM notifications
                 WHERE recipient_id = ?1 AND recipient_kind = ?2
                 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt
                .query_map(params![recipient_id, kind.as_str()], |row| {
                    Ok(NotificationRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        body: row.get(2)?,
                        created_at: row.get(3)?,
                        read: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Messages --

    /// Appends a message after checking, in the same transaction, that the
    /// pair's connection is accepted. Anything else is [`Error::NotConnected`].
    pub fn insert_message(
        &self,
        sender_id: i64,
        sender_kind: AccountKind,
        recipient_id: i64,
        recipient_kind: AccountKind,
        body: &str,
    ) -> Result<i64, Error> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let (investor_id, company_id) = pair_ids(sender_id, sender_kind, recipient_id);
            require_accepted(&tx, investor_id, company_id)?;
            tx.execute(
                "INSERT INTO messages (sender_id, sender_kind, recipient_id, recipient_kind, body)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    sender_id,
                    sender_kind.as_str(),
                    recipient_id,
                    recipient_kind.as_str(),
                    body,
                ],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
    }

    /// Conversation list: one row per counterpart with an accepted
    /// connection, carrying the newest message between the pair (if any) via
    /// correlated subqueries.
    pub fn conversation_summaries(
        &self,
        account_id: i64,
        kind: AccountKind,
    ) -> Result<Vec<ConversationRow>, Error> {
        self.with_conn(|conn| {
            let sql = match kind {
                AccountKind::Investor => {
                    "SELECT co.id, co.trade_name,
                        (SELECT m.body FROM messages m
                          WHERE (m.sender_id = ?1 AND m.sender_kind = 'investor'
                                 AND m.recipient_id = co.id AND m.recipient_kind = 'company')
                             OR (m.sender_id = co.id AND m.sender_kind = 'company'
                                 AND m.recipient_id = ?1 AND m.recipient_kind = 'investor')
                          ORDER BY m.sent_at DESC, m.id DESC LIMIT 1),
                        (SELECT m.sent_at FROM messages m
                          WHERE (m.sender_id = ?1 AND m.sender_kind = 'investor'
                                 AND m.recipient_id = co.id AND m.recipient_kind = 'company')
                             OR (m.sender_id = co.id AND m.sender_kind = 'company'
                                 AND m.recipient_id = ?1 AND m.recipient_kind = 'investor')
                          ORDER BY m.sent_at DESC, m.id DESC LIMIT 1)
                     FROM connections c
                     JOIN companies co ON co.id = c.company_id
                     WHERE c.investor_id = ?1 AND c.status = 'accepted'
                     ORDER BY c.created_at DESC, c.id DESC"
                }
                AccountKind::Company => {
                    "SELECT u.id, u.full_name,
                        (SELECT m.body FROM messages m
                          WHERE (m.sender_id = ?1 AND m.sender_kind = 'company'
                                 AND m.recipient_id = u.id AND m.recipient_kind = 'investor')
                             OR (m.sender_id = u.id AND m.sender_kind = 'investor'
                                 AND m.recipient_id = ?1 AND m.recipient_kind = 'company')
                          ORDER BY m.sent_at DESC, m.id DESC LIMIT 1),
                        (SELECT m.sent_at FROM messages m
                          WHERE (m.sender_id = ?1 AND m.sender_kind = 'company'
                                 AND m.recipient_id = u.id AND m.recipient_kind = 'investor')
                             OR (m.sender_id = u.id AND m.sender_kind = 'investor'
                                 AND m.recipient_id = ?1 AND m.recipient_kind = 'company')
                          ORDER BY m.sent_at DESC, m.id DESC LIMIT 1)
                     FROM connections c
                     JOIN investors u ON u.id = c.investor_id
                     WHERE c.company_id = ?1 AND c.status = 'accepted'
                     ORDER BY c.created_at DESC, c.id DESC"
                }
            };
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt
                .query_map([account_id], |row| {
                    Ok(ConversationRow {
                        counterpart_id: row.get(0)?,
                        counterpart_name: row.get(1)?,
                        last_body: row.get(2)?,
                        last_sent_at: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Opens a conversation as the viewer: requires an accepted connection,
    /// marks the viewer's incoming messages read, and returns the history
    /// oldest first — all in one transaction.
    pub fn open_conversation(
        &self,
        viewer_id: i64,
        viewer_kind: AccountKind,
        counterpart_id: i64,
    ) -> Result<Vec<MessageRow>, Error> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let (investor_id, company_id) = pair_ids(viewer_id, viewer_kind, counterpart_id);
            require_accepted(&tx, investor_id, company_id)?;
            let counterpart_kind = viewer_kind.counterpart();
            tx.execute(
                "UPDATE messages SET read = 1
                 WHERE recipient_id = ?1 AND recipient_kind = ?2
                   AND sender_id = ?3 AND sender_kind = ?4",
                params![
                    viewer_id,
                    viewer_kind.as_str(),
                    counterpart_id,
                    counterpart_kind.as_str(),
                ],
            )?;
            let rows = {
                let mut stmt = tx.prepare(
                    "SELECT id, sender_id, sender_kind, body, sent_at, read FROM messages
                     WHERE (sender_id = ?1 AND sender_kind = ?2
                            AND recipient_id = ?3 AND recipient_kind = ?4)
                        OR (sender_id = ?3 AND sender_kind = ?4
                            AND recipient_id = ?1 AND recipient_kind = ?2)
                     ORDER BY sent_at ASC, id ASC",
                )?;
                stmt.query_map(
                    params![
                        viewer_id,
                        viewer_kind.as_str(),
                        counterpart_id,
                        counterpart_kind.as_str(),
                    ],
                    |row| {
                        Ok(MessageRow {
                            id: row.get(0)?,
                            sender_id: row.get(1)?,
                            sender_kind: row.get(2)?,
                            body: row.get(3)?,
                            sent_at: row.get(4)?,
                            read: row.get(5)?,
                        })
                    },
                )?
                .collect::<Result<Vec<_>, _>>()?
            };
            tx.commit()?;
            Ok(rows)
        })
    }

    pub fn unread_message_count(
        &self,
        recipient_id: i64,
        kind: AccountKind,
    ) -> Result<i64, Error> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM messages
                 WHERE recipient_id = ?1 AND recipient_kind = ?2 AND read = 0",
                params![recipient_id, kind.as_str()],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    // -- Search --

    /// Substring search over companies as an investor. The connection status
    /// is resolved by a LEFT JOIN in the same query (eliminates N+1 per-hit
    /// lookups).
    pub fn search_companies(
        &self,
        investor_id: i64,
        query: &str,
    ) -> Result<Vec<CompanyHitRow>, Error> {
        self.with_conn(|conn| {
            let pattern = format!("%{query}%");
            let mut stmt = conn.prepare(
                "SELECT e.id, e.trade_name, e.email, e.city, e.state, c.status
                 FROM companies e
                 LEFT JOIN connections c
                   ON c.company_id = e.id AND c.investor_id = ?1
                 WHERE e.trade_name LIKE ?2 OR e.legal_name LIKE ?2 OR e.email LIKE ?2
                 ORDER BY e.trade_name COLLATE NOCASE",
            )?;
            let rows = stmt
                .query_map(params![investor_id, pattern], |row| {
                    Ok(CompanyHitRow {
                        id: row.get(0)?,
                        trade_name: row.get(1)?,
                        email: row.get(2)?,
                        city: row.get(3)?,
                        state: row.get(4)?,
                        status: row.get(5)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn search_investors(
        &self,
        company_id: i64,
        query: &str,
    ) -> Result<Vec<InvestorHitRow>, Error> {
        self.with_conn(|conn| {
            let pattern = format!("%{query}%");
            let mut stmt = conn.prepare(
                "SELECT u.id, u.full_name, u.email, u.gender, c.status
                 FROM investors u
                 LEFT JOIN connections c
                   ON c.investor_id = u.id AND c.company_id = ?1
                 WHERE u.full_name LIKE ?2 OR u.email LIKE ?2
                 ORDER BY u.full_name COLLATE NOCASE",
            )?;
            let rows = stmt
                .query_map(params![company_id, pattern], |row| {
                    Ok(InvestorHitRow {
                        id: row.get(0)?,
                        full_name: row.get(1)?,
                        email: row.get(2)?,
                        gender: row.get(3)?,
                        status: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn account_table(kind: AccountKind) -> &'static str {
    match kind {
        AccountKind::Investor => "investors",
        AccountKind::Company => "companies",
    }
}

fn email_taken(conn: &Connection, email: &str) -> Result<bool, Error> {
    let taken = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM investors WHERE email = ?1)
             OR EXISTS(SELECT 1 FROM companies WHERE email = ?1)",
        [email],
        |row| row.get(0),
    )?;
    Ok(taken)
}

fn account_exists(conn: &Connection, account_id: i64, kind: AccountKind) -> Result<bool, Error> {
    let exists = conn.query_row(
        &format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)",
            account_table(kind)
        ),
        [account_id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Maps (sender, sender kind, recipient) onto the (investor, company) pair a
/// connection row is keyed by.
fn pair_ids(account_id: i64, kind: AccountKind, counterpart_id: i64) -> (i64, i64) {
    match kind {
        AccountKind::Investor => (account_id, counterpart_id),
        AccountKind::Company => (counterpart_id, account_id),
    }
}

fn require_accepted(conn: &Connection, investor_id: i64, company_id: i64) -> Result<(), Error> {
    let status: Option<String> = conn
        .query_row(
            "SELECT status FROM connections WHERE investor_id = ?1 AND company_id = ?2",
            params![investor_id, company_id],
            |row| row.get(0),
        )
        .optional()?;
    if status.as_deref() != Some(ConnectionStatus::Accepted.as_str()) {
        return Err(Error::NotConnected);
    }
    Ok(())
}

fn insert_notification(
    conn: &Connection,
    recipient_id: i64,
    recipient_kind: AccountKind,
    title: &str,
    body: &str,
) -> Result<(), Error> {
    conn.execute(
        "INSERT INTO notifications (recipient_id, recipient_kind, title, body)
         VALUES (?1, ?2, ?3, ?4)",
        params![recipient_id, recipient_kind.as_str(), title, body],
    )?;
    Ok(())
}
