//! Table manager for spawning and tracking table actors.

use serde::Serialize;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    TableError,
    actor::{TableActor, TableHandle},
    config::TableConfig,
    messages::LeaveResponse,
};
use crate::game::{GameId, HandScorer, Player, PlayerId};

/// Table metadata for discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    pub id: GameId,
    pub player_count: usize,
    pub max_players: usize,
}

/// Registry of live tables, keyed by game id.
///
/// Tables are spawned on demand and dropped from the registry once their
/// last player leaves through [`TableManager::leave_game`].
pub struct TableManager {
    /// Settings for every table this manager spawns
    config: TableConfig,

    scorer: Arc<dyn HandScorer>,

    /// Active table handles
    tables: Arc<RwLock<HashMap<GameId, TableHandle>>>,

    /// Cached player counts with the table revision they were read at, so
    /// listing tables doesn't message every actor
    player_count_cache: Arc<RwLock<HashMap<GameId, (usize, u64)>>>,
}

impl TableManager {
    /// # Errors
    ///
    /// Fails if `config` doesn't validate.
    pub fn new(config: TableConfig, scorer: Arc<dyn HandScorer>) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self {
            config,
            scorer,
            tables: Arc::new(RwLock::new(HashMap::new())),
            player_count_cache: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Create a manager configured from `TABLE_*` environment variables.
    pub fn from_env(scorer: Arc<dyn HandScorer>) -> Result<Self, TableError> {
        Self::new(TableConfig::from_env()?, scorer)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// A fresh player holding the configured starting bank.
    pub fn new_player(&self, id: impl Into<PlayerId>, name: impl Into<String>) -> Player {
        Player::new(id, name, self.config.starting_bank)
    }

    fn spawn(&self, game_id: GameId) -> TableHandle {
        let (actor, handle) = TableActor::new(game_id, &self.config, Arc::clone(&self.scorer));
        tokio::spawn(actor.run());
        handle
    }

    /// Create and spawn a table under a new random id
    pub async fn create_game(&self) -> GameId {
        let game_id = GameId::new(Uuid::new_v4().to_string());
        self.get_or_create(game_id.clone()).await;
        log::info!("Created table {}", game_id);
        game_id
    }

    /// Get the table with this id, spawning it if it doesn't exist yet.
    pub async fn get_or_create(&self, game_id: GameId) -> TableHandle {
        let mut tables = self.tables.write().await;
        if let Some(handle) = tables.get(&game_id)
            && !handle.is_closed()
        {
            return handle.clone();
        }

        let handle = self.spawn(game_id.clone());
        tables.insert(game_id.clone(), handle.clone());
        drop(tables);

        let mut cache = self.player_count_cache.write().await;
        cache.insert(game_id, (0, 0));
        drop(cache);

        handle
    }

    pub async fn get_game(&self, game_id: &GameId) -> Option<TableHandle> {
        let tables = self.tables.read().await;
        tables.get(game_id).cloned()
    }

    async fn require_game(&self, game_id: &GameId) -> Result<TableHandle, TableError> {
        self.get_game(game_id)
            .await
            .ok_or_else(|| TableError::NotFound(game_id.clone()))
    }

    /// Seat a player at an existing table
    pub async fn join_game(&self, game_id: &GameId, player: Player) -> Result<usize, TableError> {
        let handle = self.require_game(game_id).await?;
        let joined = handle.join(player).await?;
        self.update_player_count_cache(game_id, joined.player_count, joined.revision)
            .await;
        Ok(joined.player_count)
    }

    /// Unseat a player. The table is closed and forgotten once nobody is
    /// left at it.
    pub async fn leave_game(
        &self,
        game_id: &GameId,
        player_id: PlayerId,
    ) -> Result<LeaveResponse, TableError> {
        let handle = self.require_game(game_id).await?;
        let response = handle.leave_and_close_if_empty(player_id).await?;

        if response.closed {
            self.forget(game_id, &handle).await;
            log::info!("Evicted empty table {}", game_id);
        } else {
            self.update_player_count_cache(game_id, response.remaining, response.revision)
                .await;
        }

        Ok(response)
    }

    /// Close a table, whoever is still seated
    pub async fn close_game(&self, game_id: &GameId) -> Result<(), TableError> {
        let handle = self.require_game(game_id).await?;
        match handle.close().await {
            Ok(()) | Err(TableError::Closed(_)) => {}
            Err(err) => return Err(err),
        }
        self.forget(game_id, &handle).await;
        log::info!("Closed table {}", game_id);
        Ok(())
    }

    /// Drop `handle`'s table from the registry unless it has already been
    /// replaced.
    async fn forget(&self, game_id: &GameId, handle: &TableHandle) {
        let mut tables = self.tables.write().await;
        if tables
            .get(game_id)
            .is_some_and(|current| current.same_table(handle))
        {
            tables.remove(game_id);
            drop(tables);

            let mut cache = self.player_count_cache.write().await;
            cache.remove(game_id);
        }
    }

    /// List all active tables, ordered by id
    pub async fn list_games(&self) -> Vec<TableMetadata> {
        let tables = self.tables.read().await;
        let cache = self.player_count_cache.read().await;

        let mut games: Vec<TableMetadata> = tables
            .keys()
            .map(|id| TableMetadata {
                id: id.clone(),
                player_count: cache.get(id).map_or(0, |&(count, _)| count),
                max_players: self.config.max_players,
            })
            .collect();
        games.sort_by(|a, b| a.id.cmp(&b.id));
        games
    }

    pub async fn active_game_count(&self) -> usize {
        let tables = self.tables.read().await;
        tables.len()
    }

    /// Replies from concurrent joins and leaves can arrive in any order, so
    /// a count only replaces one read at an earlier revision.
    async fn update_player_count_cache(
        &self,
        game_id: &GameId,
        player_count: usize,
        revision: u64,
    ) {
        let mut cache = self.player_count_cache.write().await;
        if let Some(entry) = cache.get_mut(game_id)
            && revision > entry.1
        {
            *entry = (player_count, revision);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TieScorer;

    fn manager() -> TableManager {
        TableManager::new(TableConfig::default(), Arc::new(TieScorer)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = TableConfig {
            max_players: 0,
            ..Default::default()
        };
        let result = TableManager::new(config, Arc::new(TieScorer));
        assert!(matches!(result, Err(TableError::Config(_))));
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let manager = manager();
        let a = manager.create_game().await;
        let b = manager.create_game().await;
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
        assert_eq!(manager.active_game_count().await, 2);

        manager
            .join_game(&a, manager.new_player("p1", "Alice"))
            .await
            .unwrap();
        let listed = manager.list_games().await;
        let entry = listed.iter().find(|meta| meta.id == a).unwrap();
        assert_eq!(entry.player_count, 1);
        assert_eq!(entry.max_players, 8);
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_table() {
        let manager = manager();
        let id = GameId::new("lobby");
        let first = manager.get_or_create(id.clone()).await;
        let second = manager.get_or_create(id.clone()).await;
        assert!(first.same_table(&second));
        assert_eq!(manager.active_game_count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_game() {
        let manager = manager();
        let id = GameId::new("missing");
        let err = manager
            .join_game(&id, manager.new_player("p1", "Alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, TableError::NotFound(missing) if missing == id));
        assert!(manager.get_game(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_stale_count_does_not_replace_newer() {
        let manager = manager();
        let id = manager.create_game().await;
        manager.update_player_count_cache(&id, 3, 3).await;
        manager.update_player_count_cache(&id, 2, 2).await;
        assert_eq!(manager.list_games().await[0].player_count, 3);
        manager.update_player_count_cache(&id, 4, 4).await;
        assert_eq!(manager.list_games().await[0].player_count, 4);
    }

    #[tokio::test]
    async fn test_close_game() {
        let manager = manager();
        let id = manager.create_game().await;
        let handle = manager.get_game(&id).await.unwrap();
        manager.close_game(&id).await.unwrap();
        assert_eq!(manager.active_game_count().await, 0);
        assert!(handle.state().await.is_err());
        assert!(matches!(
            manager.close_game(&id).await,
            Err(TableError::NotFound(_))
        ));
    }
}
