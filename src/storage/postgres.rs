use super::*;
use crate::ID;
use crate::Unique;
use crate::identity::Member;
use crate::ledger::Ledger;
use crate::ledger::Player;
use crate::ledger::Policy;
use crate::tracker::Session;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::types::Json;

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across async tasks; the
/// connection itself is driven on a spawned task.
pub async fn db(url: &str) -> anyhow::Result<Arc<Client>> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// Creates every table and index this crate uses.
pub async fn migrate(client: &Client) -> anyhow::Result<()> {
    log::info!("migrating tables ({}, {}, {})", USERS, GAMES, SESSIONS);
    client.batch_execute(Member::creates()).await?;
    client.batch_execute(Game::creates()).await?;
    client.batch_execute(Session::creates()).await?;
    client.batch_execute(Member::indices()).await?;
    client.batch_execute(Game::indices()).await?;
    client.batch_execute(Session::indices()).await?;
    Ok(())
}

/// Registers a member if their username is not taken yet.
pub async fn enroll(client: &Client, member: &Member) -> anyhow::Result<Member> {
    #[rustfmt::skip]
    const SQL: &str = const_format::concatcp!(
        "INSERT INTO ", USERS, " (id, username, email) ",
        "VALUES                  ($1, $2,       $3) ",
        "ON CONFLICT (username) DO UPDATE SET username = EXCLUDED.username ",
        "RETURNING id, username, email"
    );
    let row = client
        .query_one(
            SQL,
            &[&member.id().inner(), &member.username(), &member.email()],
        )
        .await?;
    Ok(Member::new(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
    ))
}

#[async_trait::async_trait]
impl GameRepository for Arc<Client> {
    async fn fetch_game(&self, user: ID<Member>) -> anyhow::Result<Option<Game>> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "SELECT   id, user_id, players, residue, policy, is_active, created_at, updated_at ",
            "FROM     ", GAMES, " ",
            "WHERE    user_id = $1 ",
            "ORDER BY is_active DESC, updated_at DESC ",
            "LIMIT    1"
        );
        let Some(row) = self.query_opt(SQL, &[&user.inner()]).await? else {
            return Ok(None);
        };
        let policy = row
            .get::<_, String>(4)
            .parse::<Policy>()
            .map_err(anyhow::Error::msg)?;
        let Json(players) = row.get::<_, Json<Vec<Player>>>(2);
        let ledger = Ledger::from_parts(policy, players, row.get::<_, f64>(3));
        Ok(Some(Game::hydrate(
            ID::from(row.get::<_, uuid::Uuid>(0)),
            ID::from(row.get::<_, uuid::Uuid>(1)),
            ledger,
            row.get::<_, bool>(5),
            row.get::<_, DateTime<Utc>>(6),
            row.get::<_, DateTime<Utc>>(7),
        )))
    }

    async fn save_game(&self, user: ID<Member>, ledger: &Ledger) -> anyhow::Result<ID<Game>> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "INSERT INTO ", GAMES, " (id, user_id, players, residue, policy, pot, is_active) ",
            "VALUES                  ($1, $2,      $3,      $4,      $5,     $6,  TRUE) ",
            "ON CONFLICT (user_id) WHERE is_active ",
            "DO UPDATE SET ",
                "players    = EXCLUDED.players, ",
                "residue    = EXCLUDED.residue, ",
                "policy     = EXCLUDED.policy, ",
                "pot        = EXCLUDED.pot, ",
                "updated_at = now() ",
            "RETURNING id"
        );
        let row = self
            .query_one(
                SQL,
                &[
                    &ID::<Game>::default().inner(),
                    &user.inner(),
                    &Json(ledger.players()),
                    &ledger.residue(),
                    &ledger.policy().to_string(),
                    &ledger.pot(),
                ],
            )
            .await?;
        Ok(ID::from(row.get::<_, uuid::Uuid>(0)))
    }

    async fn end_game(&self, user: ID<Member>, game: ID<Game>) -> anyhow::Result<bool> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "UPDATE ", GAMES, " ",
            "SET    is_active = FALSE, updated_at = now() ",
            "WHERE  id = $1 ",
            "AND    user_id = $2"
        );
        Ok(self.execute(SQL, &[&game.inner(), &user.inner()]).await? > 0)
    }
}

#[async_trait::async_trait]
impl SessionRepository for Arc<Client> {
    async fn fetch_sessions(&self, user: ID<Member>) -> anyhow::Result<Vec<Session>> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "SELECT   id, date, hours, profit, notes ",
            "FROM     ", SESSIONS, " ",
            "WHERE    user_id = $1 ",
            "ORDER BY date DESC, created_at DESC"
        );
        Ok(self
            .query(SQL, &[&user.inner()])
            .await?
            .iter()
            .map(|row| {
                Session::new(
                    ID::from(row.get::<_, uuid::Uuid>(0)),
                    row.get::<_, NaiveDate>(1),
                    row.get::<_, f64>(2),
                    row.get::<_, f64>(3),
                    row.get::<_, Option<String>>(4),
                )
            })
            .collect())
    }

    async fn save_sessions(&self, user: ID<Member>, sessions: &[Session]) -> anyhow::Result<()> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "DELETE FROM ", SESSIONS, " ",
            "WHERE       user_id = $1"
        );
        // shared client, so the transaction is opened by hand
        self.batch_execute("BEGIN").await?;
        let replace = async {
            self.execute(SQL, &[&user.inner()]).await?;
            for session in sessions {
                self.save_session(user, session).await?;
            }
            Ok::<_, anyhow::Error>(())
        };
        match replace.await {
            Ok(()) => {
                self.batch_execute("COMMIT").await?;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback) = self.batch_execute("ROLLBACK").await {
                    log::warn!("rollback failed: {}", rollback);
                }
                Err(e)
            }
        }
    }

    async fn save_session(&self, user: ID<Member>, session: &Session) -> anyhow::Result<()> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "INSERT INTO ", SESSIONS, " (id, user_id, date, hours, profit, notes) ",
            "VALUES                     ($1, $2,      $3,   $4,    $5,     $6) ",
            "ON CONFLICT (id) DO UPDATE SET ",
                "date   = EXCLUDED.date, ",
                "hours  = EXCLUDED.hours, ",
                "profit = EXCLUDED.profit, ",
                "notes  = EXCLUDED.notes"
        );
        self.execute(
            SQL,
            &[
                &session.id().inner(),
                &user.inner(),
                &session.date(),
                &session.hours(),
                &session.profit(),
                &session.notes(),
            ],
        )
        .await?;
        Ok(())
    }

    async fn update_session(&self, user: ID<Member>, session: &Session) -> anyhow::Result<bool> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "UPDATE ", SESSIONS, " ",
            "SET    date = $3, hours = $4, profit = $5, notes = $6 ",
            "WHERE  id = $1 ",
            "AND    user_id = $2"
        );
        let rows = self
            .execute(
                SQL,
                &[
                    &session.id().inner(),
                    &user.inner(),
                    &session.date(),
                    &session.hours(),
                    &session.profit(),
                    &session.notes(),
                ],
            )
            .await?;
        Ok(rows > 0)
    }

    async fn delete_session(&self, user: ID<Member>, id: ID<Session>) -> anyhow::Result<bool> {
        #[rustfmt::skip]
        const SQL: &str = const_format::concatcp!(
            "DELETE FROM ", SESSIONS, " ",
            "WHERE       id = $1 ",
            "AND         user_id = $2"
        );
        Ok(self.execute(SQL, &[&id.inner(), &user.inner()]).await? > 0)
    }
}
