use super::*;
use crate::CENTS_EPSILON;
use crate::Dollars;
use crate::ID;
use crate::Unique;

/// Players, their buy-ins, and the shared pot for one game.
///
/// The pot is never stored. It is derived from the buy-ins, the cash-outs
/// and the `residue` left behind by removed players, so the three can
/// never drift apart.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ledger {
    #[serde(default)]
    policy: Policy,
    players: Vec<Player>,
    #[serde(default)]
    residue: Dollars,
}

impl Ledger {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            players: Vec::new(),
            residue: 0.,
        }
    }
    /// Rebuild a ledger from persisted parts.
    pub fn from_parts(policy: Policy, players: Vec<Player>, residue: Dollars) -> Self {
        Self {
            policy,
            players,
            residue,
        }
    }
    pub fn policy(&self) -> Policy {
        self.policy
    }
    pub fn residue(&self) -> Dollars {
        self.residue
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn len(&self) -> usize {
        self.players.len()
    }
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
    pub fn get(&self, id: ID<Player>) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }
    /// Look a player up by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.named(name))
    }
    pub fn active(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }
    pub fn inactive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_active())
    }
    /// Result lines for everyone who is no longer playing.
    pub fn standings(&self) -> Vec<Standing> {
        self.inactive().map(Standing::from).collect()
    }

    /// Money currently on the table.
    pub fn pot(&self) -> Dollars {
        let pot = match self.policy {
            Policy::Simple => {
                let stakes = self.players.iter().map(Player::total).sum::<Dollars>();
                let withdrawn = self.players.iter().map(Player::withdrawn).sum::<Dollars>();
                self.residue + stakes - withdrawn
            }
            Policy::Proportional => {
                self.residue + self.players.iter().map(Player::stake).sum::<Dollars>()
            }
        };
        pot.max(0.)
    }

    pub fn add(&mut self, name: &str) -> Result<ID<Player>, Rejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyName);
        }
        if let Some(existing) = self.find(name) {
            return Err(Rejection::DuplicateName(existing.name().to_string()));
        }
        let player = Player::new(ID::default(), name.to_string());
        let id = player.id();
        log::debug!("[ledger] seating {}", name);
        self.players.push(player);
        Ok(id)
    }

    pub fn buyin(&mut self, id: ID<Player>, amount: Dollars) -> Result<(), Rejection> {
        Self::positive(amount)?;
        let player = self.lookup(id)?;
        player.buy(amount);
        log::debug!("[ledger] {} buys in ${:.2}", player.name(), amount);
        Ok(())
    }

    pub fn cashout(&mut self, id: ID<Player>, amount: Dollars) -> Result<(), Rejection> {
        Self::positive(amount)?;
        let pot = self.pot();
        if amount > pot + CENTS_EPSILON {
            return Err(Rejection::InsufficientPot { amount, pot });
        }
        if let Some(Status::Cashed(_)) = self.get(id).map(Player::status) {
            return Err(Rejection::AlreadyCashed(self.name(id)));
        }
        let stake = self.lookup(id)?.stake();
        if let Policy::Proportional = self.policy {
            self.spread(id, pot - stake, (pot - amount).max(0.));
        }
        let proportional = matches!(self.policy, Policy::Proportional);
        let player = self.lookup(id)?;
        if proportional {
            player.bank();
        }
        player.settle(amount);
        log::debug!("[ledger] {} cashes out ${:.2}", player.name(), amount);
        Ok(())
    }

    /// Drop a player from the game. Money they left on the table stays in
    /// the pot. Unknown ids are ignored.
    pub fn remove(&mut self, id: ID<Player>) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id() == id)?;
        let player = self.players.remove(index);
        self.residue += match self.policy {
            Policy::Simple => player.total() - player.withdrawn(),
            Policy::Proportional => player.stake(),
        };
        log::debug!("[ledger] removed {}", player.name());
        Some(player)
    }

    /// Flip a player in or out of play. Returns whether they are now active.
    pub fn toggle(&mut self, id: ID<Player>) -> Result<bool, Rejection> {
        let player = self.lookup(id)?;
        player.toggle();
        log::debug!("[ledger] {} is now {}", player.name(), player.status());
        Ok(player.is_active())
    }

    /// Resize everyone else's stake and the residue so that together they
    /// hold `target`. With nothing else on the table it all becomes residue.
    fn spread(&mut self, id: ID<Player>, rest: Dollars, target: Dollars) {
        if rest > CENTS_EPSILON {
            let factor = target / rest;
            self.players
                .iter_mut()
                .filter(|p| p.id() != id)
                .for_each(|p| p.scale(factor));
            self.residue *= factor;
        } else {
            self.residue = target;
        }
    }
    fn lookup(&mut self, id: ID<Player>) -> Result<&mut Player, Rejection> {
        self.players
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(Rejection::UnknownPlayer(id))
    }
    fn name(&self, id: ID<Player>) -> String {
        self.get(id).map(|p| p.name().to_string()).unwrap_or_default()
    }
    fn positive(amount: Dollars) -> Result<(), Rejection> {
        if amount.is_finite() && amount > 0. {
            Ok(())
        } else {
            Err(Rejection::InvalidAmount(amount))
        }
    }
}

impl std::fmt::Display for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "pot ${:.2}  players {}/{}  ({})",
            self.pot(),
            self.active().count(),
            self.len(),
            self.policy
        )?;
        for player in self.active().chain(self.inactive()) {
            writeln!(f, "{}", player)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Dollars, b: Dollars) -> bool {
        (a - b).abs() < 1e-6
    }

    fn table(policy: Policy) -> (Ledger, ID<Player>, ID<Player>) {
        let mut ledger = Ledger::new(policy);
        let alice = ledger.add("Alice").unwrap();
        let bob = ledger.add("Bob").unwrap();
        ledger.buyin(alice, 100.).unwrap();
        ledger.buyin(bob, 50.).unwrap();
        (ledger, alice, bob)
    }

    #[test]
    fn add_rejects_blank_names() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.add(""), Err(Rejection::EmptyName));
        assert_eq!(ledger.add("   "), Err(Rejection::EmptyName));
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_rejects_duplicates_ignoring_case() {
        let mut ledger = Ledger::default();
        let alice = ledger.add("Alice").unwrap();
        assert_eq!(
            ledger.add("alice"),
            Err(Rejection::DuplicateName("Alice".into()))
        );
        ledger.buyin(alice, 10.).unwrap();
        ledger.cashout(alice, 10.).unwrap();
        assert!(ledger.add(" ALICE ").is_err());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn add_trims_and_starts_active() {
        let mut ledger = Ledger::default();
        let id = ledger.add("  Carol ").unwrap();
        let carol = ledger.get(id).unwrap();
        assert_eq!(carol.name(), "Carol");
        assert!(carol.is_active());
        assert_eq!(carol.total(), 0.);
        assert!(carol.buyins().is_empty());
    }

    #[test]
    fn buyins_accumulate_into_total_and_pot() {
        let mut ledger = Ledger::default();
        let alice = ledger.add("Alice").unwrap();
        let amounts = [20., 35.5, 0.25, 100.];
        for amount in amounts {
            ledger.buyin(alice, amount).unwrap();
        }
        let total = amounts.iter().sum::<Dollars>();
        assert_eq!(ledger.get(alice).unwrap().total(), total);
        assert_eq!(ledger.pot(), total);
    }

    #[test]
    fn buyin_rejects_bad_input() {
        let (mut ledger, alice, _) = table(Policy::Simple);
        let before = ledger.clone();
        assert_eq!(ledger.buyin(alice, 0.), Err(Rejection::InvalidAmount(0.)));
        assert_eq!(ledger.buyin(alice, -5.), Err(Rejection::InvalidAmount(-5.)));
        assert!(ledger.buyin(alice, Dollars::NAN).is_err());
        assert!(ledger.buyin(alice, Dollars::INFINITY).is_err());
        let ghost = ID::default();
        assert_eq!(ledger.buyin(ghost, 5.), Err(Rejection::UnknownPlayer(ghost)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn simple_cashout_leaves_other_stakes_alone() {
        let (mut ledger, alice, bob) = table(Policy::Simple);
        assert_eq!(ledger.pot(), 150.);
        ledger.cashout(alice, 120.).unwrap();
        assert_eq!(ledger.pot(), 30.);
        let alice = ledger.get(alice).unwrap();
        assert!(!alice.is_active());
        assert_eq!(alice.cashout(), Some(120.));
        assert_eq!(alice.net(), 20.);
        assert_eq!(ledger.get(bob).unwrap().total(), 50.);
        assert_eq!(ledger.get(bob).unwrap().buyins(), &[50.]);
    }

    #[test]
    fn simple_cashout_only_touches_one_player() {
        let mut ledger = Ledger::default();
        let ids = ["A", "B", "C", "D"]
            .iter()
            .map(|n| ledger.add(n).unwrap())
            .collect::<Vec<_>>();
        for (i, id) in ids.iter().enumerate() {
            ledger.buyin(*id, 10. * (i + 1) as Dollars).unwrap();
        }
        let before = ledger.clone();
        ledger.cashout(ids[2], 55.).unwrap();
        assert_eq!(ledger.inactive().count(), before.inactive().count() + 1);
        for (old, new) in before.players().iter().zip(ledger.players()) {
            assert_eq!(old.total(), new.total());
        }
        assert_eq!(ledger.pot(), before.pot() - 55.);
    }

    #[test]
    fn proportional_cashout_spreads_over_other_stakes() {
        let (mut ledger, alice, bob) = table(Policy::Proportional);
        ledger.cashout(alice, 120.).unwrap();
        assert!(close(ledger.pot(), 30.));
        assert!(close(ledger.get(bob).unwrap().total(), 30.));
        let alice = ledger.get(alice).unwrap();
        assert_eq!(alice.cashout(), Some(120.));
        assert_eq!(alice.buyins(), &[100.]);
        assert_eq!(alice.stake(), 0.);
    }

    #[test]
    fn proportional_net_is_against_money_paid_in() {
        let (mut ledger, alice, bob) = table(Policy::Proportional);
        ledger.cashout(alice, 120.).unwrap();
        let finished = ledger.standings();
        assert_eq!(finished[0].paid(), 100.);
        assert_eq!(finished[0].net(), Some(20.));
        assert!(close(ledger.get(alice).unwrap().net(), 20.));
        ledger.cashout(bob, 10.).unwrap();
        let standings = ledger.standings();
        assert_eq!(standings[0], finished[0]);
        assert_eq!(standings[1].net(), Some(-40.));
        assert!(close(ledger.pot(), 20.));
        assert!(close(ledger.residue(), 20.));
    }

    #[test]
    fn proportional_cashout_conserves_stakes() {
        let mut ledger = Ledger::new(Policy::Proportional);
        let ids = ["A", "B", "C"]
            .iter()
            .map(|n| ledger.add(n).unwrap())
            .collect::<Vec<_>>();
        ledger.buyin(ids[0], 40.).unwrap();
        ledger.buyin(ids[0], 33.3).unwrap();
        ledger.buyin(ids[1], 12.7).unwrap();
        ledger.buyin(ids[2], 91.).unwrap();
        let stakes = |l: &Ledger| {
            l.residue() + l.players().iter().map(Player::stake).sum::<Dollars>()
        };
        let before = stakes(&ledger);
        ledger.cashout(ids[1], 64.).unwrap();
        assert!(close(stakes(&ledger), before - 64.));
        ledger.cashout(ids[0], 30.).unwrap();
        assert!(close(stakes(&ledger), before - 94.));
        assert!(close(ledger.pot(), before - 94.));
        for player in ledger.players() {
            let sum = player.buyins().iter().sum::<Dollars>();
            assert!(close(sum, player.total()));
        }
        assert_eq!(ledger.get(ids[1]).unwrap().total(), 12.7);
    }

    #[test]
    fn proportional_rejoin_keeps_pot() {
        let (mut ledger, alice, _) = table(Policy::Proportional);
        ledger.cashout(alice, 120.).unwrap();
        let pot = ledger.pot();
        assert_eq!(ledger.toggle(alice), Ok(true));
        assert!(close(ledger.pot(), pot));
        ledger.buyin(alice, 10.).unwrap();
        assert!(close(ledger.pot(), pot + 10.));
        assert_eq!(ledger.get(alice).unwrap().paid(), 110.);
    }

    #[test]
    fn cashout_rejects_overdraw_and_bad_input() {
        for policy in [Policy::Simple, Policy::Proportional] {
            let (mut ledger, alice, _) = table(policy);
            let before = ledger.clone();
            assert_eq!(
                ledger.cashout(alice, 150.01),
                Err(Rejection::InsufficientPot {
                    amount: 150.01,
                    pot: 150.
                })
            );
            assert!(ledger.cashout(alice, 0.).is_err());
            assert!(ledger.cashout(alice, -1.).is_err());
            assert!(ledger.cashout(ID::default(), 10.).is_err());
            assert_eq!(ledger, before);
        }
    }

    #[test]
    fn cashout_twice_is_rejected() {
        let (mut ledger, alice, _) = table(Policy::Simple);
        ledger.cashout(alice, 20.).unwrap();
        let before = ledger.clone();
        assert_eq!(
            ledger.cashout(alice, 20.),
            Err(Rejection::AlreadyCashed("Alice".into()))
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn pot_never_negative() {
        let (mut ledger, alice, bob) = table(Policy::Simple);
        ledger.cashout(alice, 150.).unwrap();
        assert_eq!(ledger.pot(), 0.);
        assert!(ledger.cashout(bob, 0.01).is_err());
        ledger.remove(bob);
        assert!(ledger.pot() >= 0.);
    }

    #[test]
    fn remove_keeps_pot() {
        for policy in [Policy::Simple, Policy::Proportional] {
            let (mut ledger, alice, bob) = table(policy);
            ledger.cashout(bob, 70.).unwrap();
            let pot = ledger.pot();
            let gone = ledger.remove(alice).unwrap();
            assert_eq!(gone.name(), "Alice");
            assert!(close(ledger.pot(), pot));
            assert!(ledger.get(alice).is_none());
            assert!(ledger.remove(alice).is_none());
            assert!(close(ledger.pot(), pot));
        }
    }

    #[test]
    fn removed_money_is_still_settled_proportionally() {
        let (mut ledger, alice, bob) = table(Policy::Proportional);
        ledger.remove(alice);
        assert_eq!(ledger.pot(), 150.);
        ledger.cashout(bob, 75.).unwrap();
        assert!(close(ledger.pot(), 75.));
        assert!(close(ledger.residue(), 75.));
        let bob = ledger.get(bob).unwrap();
        assert_eq!(bob.total(), 50.);
        assert!(close(bob.net(), 25.));
    }

    #[test]
    fn toggle_rejoins_without_touching_totals() {
        let (mut ledger, alice, _) = table(Policy::Simple);
        ledger.cashout(alice, 60.).unwrap();
        let pot = ledger.pot();
        assert_eq!(ledger.toggle(alice), Ok(true));
        let player = ledger.get(alice).unwrap();
        assert!(player.is_active());
        assert_eq!(player.total(), 100.);
        assert_eq!(player.withdrawn(), 60.);
        assert_eq!(ledger.pot(), pot);
        assert_eq!(ledger.toggle(alice), Ok(false));
        assert_eq!(ledger.get(alice).unwrap().status(), Status::Benched);
        assert_eq!(ledger.pot(), pot);
        assert!(ledger.toggle(ID::default()).is_err());
    }

    #[test]
    fn rejoined_player_can_cash_out_again() {
        let (mut ledger, alice, _) = table(Policy::Simple);
        ledger.cashout(alice, 60.).unwrap();
        ledger.toggle(alice).unwrap();
        ledger.buyin(alice, 20.).unwrap();
        ledger.cashout(alice, 50.).unwrap();
        let player = ledger.get(alice).unwrap();
        assert_eq!(player.cashout(), Some(50.));
        assert_eq!(player.withdrawn(), 110.);
        assert_eq!(player.net(), -10.);
        assert_eq!(ledger.pot(), 60.);
    }

    #[test]
    fn views_split_active_and_finished() {
        let (mut ledger, alice, bob) = table(Policy::Simple);
        let carol = ledger.add("Carol").unwrap();
        ledger.cashout(alice, 130.).unwrap();
        ledger.toggle(carol).unwrap();
        let active = ledger.active().map(Player::id).collect::<Vec<_>>();
        assert_eq!(active, vec![bob]);
        let standings = ledger.standings();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].name(), "Alice");
        assert_eq!(standings[0].cashout(), Some(130.));
        assert_eq!(standings[0].net(), Some(30.));
        assert_eq!(standings[1].name(), "Carol");
        assert_eq!(standings[1].net(), None);
    }

    #[test]
    fn serde_round_trip_preserves_pot() {
        let (mut ledger, alice, _) = table(Policy::Proportional);
        ledger.cashout(alice, 45.).unwrap();
        let json = serde_json::to_string(&ledger).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
        assert_eq!(back.pot(), ledger.pot());
    }
}
