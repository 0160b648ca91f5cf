use super::*;
use crate::ID;
use crate::Unique;
use crate::config::Config;
use crate::desk::GameDesk;
use crate::desk::SessionDesk;
use crate::identity::Account;
use crate::ledger::Player;
use crate::storage::GameRepository;
use crate::storage::SessionRepository;
use crate::tracker::Session;
use std::io::Write;
use std::sync::Arc;

/// Read-eval-print loop over one member's game and sessions.
pub struct CLI<R>
where
    R: GameRepository + SessionRepository,
{
    game: GameDesk<R>,
    sessions: SessionDesk<R>,
}

impl<R> CLI<R>
where
    R: GameRepository + SessionRepository,
{
    pub async fn open<A>(repo: Arc<R>, account: &A, config: &Config) -> anyhow::Result<Self>
    where
        A: Account + ?Sized,
    {
        Ok(Self {
            game: GameDesk::open(repo.clone(), account, config).await?,
            sessions: SessionDesk::open(repo, account).await?,
        })
    }

    pub async fn run(&mut self) {
        log::info!("launching ledger for {}", self.game.member());
        println!("{}", self.game.ledger());
        loop {
            print!("> ");
            let ref mut input = String::new();
            if std::io::stdout().flush().is_err() {
                break;
            }
            match std::io::stdin().read_line(input) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            match input.trim() {
                "" => continue,
                "quit" => break,
                "exit" => break,
                line => match self.handle(line).await {
                    Err(e) => eprintln!("{}", e),
                    Ok(_) => continue,
                },
            }
        }
        if let Err(e) = self.game.save().await {
            log::warn!("ledger not saved on exit: {}", e);
        }
        if let Err(e) = self.sessions.save().await {
            log::warn!("sessions not saved on exit: {}", e);
        }
    }

    async fn handle(&mut self, line: &str) -> anyhow::Result<()> {
        match Command::parse_line(line)? {
            Command::Add { name } => {
                self.game.add(&name)?;
                Ok(println!("seated {}", name))
            }
            Command::Buyin { name, amount } => {
                let id = self.player(&name)?;
                self.game.buyin(id, amount)?;
                Ok(println!("pot ${:.2}", self.game.pot()))
            }
            Command::Cashout { name, amount } => {
                let id = self.player(&name)?;
                self.game.cashout(id, amount)?;
                Ok(println!("pot ${:.2}", self.game.pot()))
            }
            Command::Remove { name } => {
                let id = self.player(&name)?;
                Ok(match self.game.remove(id) {
                    Some(player) => println!("removed {}, pot ${:.2}", player.name(), self.game.pot()),
                    None => println!("no player named {}", name),
                })
            }
            Command::Toggle { name } => {
                let id = self.player(&name)?;
                let active = self.game.toggle(id)?;
                let state = if active { "back in" } else { "benched" };
                Ok(println!("{} {}", name, state))
            }
            Command::Table => {
                print!("{}", self.game.ledger());
                for standing in self.game.ledger().standings() {
                    println!("{}", standing);
                }
                Ok(())
            }
            Command::Save => {
                self.game.save().await?;
                self.sessions.save().await?;
                Ok(println!("saved"))
            }
            Command::End => {
                self.game.end().await?;
                Ok(println!("game closed"))
            }
            Command::Record {
                hours,
                profit,
                date,
                notes,
            } => {
                let notes = Command::notes(&notes);
                match date {
                    Some(date) => self.sessions.add_on(date, hours, profit, notes.as_deref())?,
                    None => self.sessions.add(hours, profit, notes.as_deref())?,
                };
                Ok(println!("{}", self.sessions.summary()))
            }
            Command::Edit {
                index,
                hours,
                profit,
                notes,
            } => {
                let notes = Command::notes(&notes);
                let id = self.session(index)?;
                self.sessions.update(id, hours, profit, notes.as_deref())?;
                Ok(println!("{}", self.sessions.summary()))
            }
            Command::Delete { index } => {
                let id = self.session(index)?;
                let gate = |prompt: &str| {
                    dialoguer::Confirm::new()
                        .with_prompt(prompt)
                        .default(false)
                        .interact()
                        .unwrap_or(false)
                };
                match self.sessions.delete(id, &gate) {
                    true => Ok(println!("deleted")),
                    false => Ok(println!("kept")),
                }
            }
            Command::Sessions => {
                for (i, session) in self.sessions.tracker().sessions().iter().enumerate() {
                    println!("{:>3}. {}", i + 1, session);
                }
                Ok(println!("{}", self.sessions.summary()))
            }
            Command::Health => Ok(println!(
                "ledger {}  sessions {}",
                self.game.health(),
                self.sessions.health()
            )),
        }
    }

    fn player(&self, name: &str) -> anyhow::Result<ID<Player>> {
        self.game
            .ledger()
            .find(name)
            .map(|p| p.id())
            .ok_or_else(|| anyhow::anyhow!("no player named {}", name))
    }

    /// Sessions are addressed by their 1-based position in the list.
    fn session(&self, index: usize) -> anyhow::Result<ID<Session>> {
        index
            .checked_sub(1)
            .and_then(|i| self.sessions.tracker().sessions().get(i))
            .map(|s| s.id())
            .ok_or_else(|| anyhow::anyhow!("no session #{}", index))
    }
}
