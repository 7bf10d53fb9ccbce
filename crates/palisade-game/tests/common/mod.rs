//! Shared test fixtures: a recording host and a canned arena setup.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use palisade_arena::{Arena, ArenaRegistry};
use palisade_game::{
    GameController, Host, HostError, Notice, RewardEvent, Settings, Summary, Waypoint,
};
use palisade_types::{ArenaId, EntityId, PlayerId};
use palisade_user::{Kit, UserRegistry};

/// Every host operation the controller can invoke, recorded in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Notify(PlayerId, Notice),
    Broadcast(Notice),
    Summary(PlayerId, Summary),
    PerformReward(RewardEvent),
    SaveInventory(PlayerId),
    RestoreInventory(PlayerId),
    Teleport(PlayerId, Waypoint),
    IsolateSpectator(PlayerId),
    RefreshVisibility,
    ShowToEveryone(PlayerId),
    ResetVitals(PlayerId),
    SetMaxHealth(PlayerId, f64),
    Heal(PlayerId),
    ClearEffects(PlayerId),
    Extinguish(PlayerId),
    NightVision(PlayerId),
    SetFlight(PlayerId, bool),
    Survival(PlayerId),
    GiveExperience(PlayerId, u32),
    ResetExperience(PlayerId),
    ClearInventory(PlayerId),
    ClearArmor(PlayerId),
    SpectatorGear(PlayerId),
    KitMenu(PlayerId),
    LeaveItem(PlayerId),
    RestockKit(PlayerId, String),
    ClearScoreboard(PlayerId),
    Despawn(EntityId),
    RestoreDoors,
    Firework(PlayerId),
    ReviveFallen,
}

/// Records every call and lets tests choose which permissions exist.
/// `allowed_nodes == None` means "grant everything".
pub struct MockHost {
    calls: Mutex<Vec<Call>>,
    allowed_nodes: Mutex<Option<HashSet<String>>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            allowed_nodes: Mutex::new(None),
        }
    }

    /// Switches permission checks from allow-all to an explicit grant list.
    pub fn deny_all_permissions(&self) {
        *self.allowed_nodes.lock().unwrap() = Some(HashSet::new());
    }

    pub fn grant_permission(&self, node: &str) {
        let mut nodes = self.allowed_nodes.lock().unwrap();
        nodes.get_or_insert_with(HashSet::new).insert(node.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == wanted)
            .count()
    }

    pub fn saw(&self, wanted: &Call) -> bool {
        self.count(wanted) > 0
    }

    fn record(&self, call: Call) -> Result<(), HostError> {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl Host for MockHost {
    fn notify(&self, player: PlayerId, notice: Notice) -> Result<(), HostError> {
        self.record(Call::Notify(player, notice))
    }

    fn broadcast(&self, _arena: &ArenaId, notice: Notice) -> Result<(), HostError> {
        self.record(Call::Broadcast(notice))
    }

    fn send_summary(&self, player: PlayerId, summary: &Summary) -> Result<(), HostError> {
        self.record(Call::Summary(player, *summary))
    }

    fn has_permission(&self, _player: PlayerId, node: &str) -> bool {
        match &*self.allowed_nodes.lock().unwrap() {
            None => true,
            Some(nodes) => nodes.contains(node),
        }
    }

    fn perform_reward(&self, _arena: &ArenaId, event: RewardEvent) -> Result<(), HostError> {
        self.record(Call::PerformReward(event))
    }

    fn save_inventory(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::SaveInventory(player))
    }

    fn restore_inventory(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::RestoreInventory(player))
    }

    fn teleport(
        &self,
        player: PlayerId,
        _arena: &ArenaId,
        waypoint: Waypoint,
    ) -> Result<(), HostError> {
        self.record(Call::Teleport(player, waypoint))
    }

    fn isolate_spectator(&self, player: PlayerId, _arena: &ArenaId) -> Result<(), HostError> {
        self.record(Call::IsolateSpectator(player))
    }

    fn refresh_visibility(&self, _arena: &ArenaId) -> Result<(), HostError> {
        self.record(Call::RefreshVisibility)
    }

    fn show_to_everyone(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::ShowToEveryone(player))
    }

    fn reset_vitals(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::ResetVitals(player))
    }

    fn set_max_health(&self, player: PlayerId, max_health: f64) -> Result<(), HostError> {
        self.record(Call::SetMaxHealth(player, max_health))
    }

    fn heal(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::Heal(player))
    }

    fn clear_effects(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::ClearEffects(player))
    }

    fn extinguish(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::Extinguish(player))
    }

    fn grant_night_vision(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::NightVision(player))
    }

    fn set_flight(&self, player: PlayerId, enabled: bool) -> Result<(), HostError> {
        self.record(Call::SetFlight(player, enabled))
    }

    fn set_survival_mode(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::Survival(player))
    }

    fn give_experience(&self, player: PlayerId, amount: u32) -> Result<(), HostError> {
        self.record(Call::GiveExperience(player, amount))
    }

    fn reset_experience(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::ResetExperience(player))
    }

    fn clear_inventory(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::ClearInventory(player))
    }

    fn clear_armor(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::ClearArmor(player))
    }

    fn give_spectator_gear(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::SpectatorGear(player))
    }

    fn give_kit_menu(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::KitMenu(player))
    }

    fn give_leave_item(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::LeaveItem(player))
    }

    fn restock_kit(&self, player: PlayerId, kit: &Kit) -> Result<(), HostError> {
        self.record(Call::RestockKit(player, kit.id().to_string()))
    }

    fn clear_scoreboard(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::ClearScoreboard(player))
    }

    fn despawn(&self, entity: EntityId) -> Result<(), HostError> {
        self.record(Call::Despawn(entity))
    }

    fn restore_doors(&self, _arena: &ArenaId) -> Result<(), HostError> {
        self.record(Call::RestoreDoors)
    }

    fn spawn_firework(&self, player: PlayerId) -> Result<(), HostError> {
        self.record(Call::Firework(player))
    }

    fn revive_fallen(&self, _arena: &ArenaId) -> Result<(), HostError> {
        self.record(Call::ReviveFallen)
    }
}

pub fn pid(id: u64) -> PlayerId {
    PlayerId(id)
}

pub fn village() -> ArenaId {
    ArenaId::new("village")
}

/// A controller over a recording host plus one ready arena ("village",
/// 2–8 players).
pub fn setup(settings: Settings) -> (GameController<MockHost>, ArenaRegistry, UserRegistry) {
    let controller = GameController::new(MockHost::new(), settings);
    let mut arenas = ArenaRegistry::new();
    let mut arena = Arena::new(village(), 2, 8);
    arena.set_ready(true);
    arenas.register(arena);
    (controller, arenas, UserRegistry::new())
}

/// Settings that keep tests synchronous: celebrations never spawn.
pub fn quiet_settings() -> Settings {
    Settings {
        fireworks_on_end: false,
        ..Settings::default()
    }
}
