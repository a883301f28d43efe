use crate::engine::Transition;
use crate::errors::SwapError;
use crate::state::SwapPool;
use anchor_lang::prelude::*;
use std::collections::BTreeMap;

/// Off-chain pool store. Commits are compare-and-swap on `SwapPool::version`.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: BTreeMap<Pubkey, SwapPool>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty pool under `pool_id`.
    pub fn create(&mut self, pool_id: Pubkey) -> Result<()> {
        require!(
            !self.pools.contains_key(&pool_id),
            SwapError::AlreadyInitialized
        );
        self.pools.insert(pool_id, SwapPool::default());
        Ok(())
    }

    pub fn get_pool_state(&self, pool_id: &Pubkey) -> Option<&SwapPool> {
        self.pools.get(pool_id)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Stores `transition.pool` if the stored pool is still at
    /// `expected_version`, and hands back the operation result.
    pub fn commit<R>(
        &mut self,
        pool_id: &Pubkey,
        expected_version: u64,
        transition: Transition<R>,
    ) -> Result<R> {
        let stored = self
            .pools
            .get_mut(pool_id)
            .ok_or(SwapError::IncorrectSwapAccount)?;
        require!(
            stored.version == expected_version,
            SwapError::StaleState
        );
        *stored = transition.pool;
        Ok(transition.result)
    }

    /// Runs `operation` against the current snapshot and commits it.
    pub fn execute<R, F>(&mut self, pool_id: &Pubkey, operation: F) -> Result<Transition<R>>
    where
        R: Clone,
        F: FnOnce(&SwapPool) -> Result<Transition<R>>,
    {
        let snapshot = self
            .pools
            .get(pool_id)
            .ok_or(SwapError::IncorrectSwapAccount)?;
        let expected_version = snapshot.version;
        let transition = operation(snapshot)?;
        self.commit(pool_id, expected_version, transition.clone())?;
        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CurveVariant, TradeDirection};
    use crate::engine::{EngineConfig, InitializeParams, PoolAccounts, PoolEngine, SwapRequest};
    use crate::errors::assert_swap_error;
    use crate::fees::FeeSchedule;

    fn engine() -> PoolEngine {
        PoolEngine::new(EngineConfig::new(crate::ID))
    }

    fn initialized(registry: &mut PoolRegistry) -> Pubkey {
        let pool_id = Pubkey::new_unique();
        registry.create(pool_id).unwrap();
        let params = InitializeParams {
            accounts: PoolAccounts::default(),
            curve: CurveVariant::ConstantProduct,
            fee_schedule: FeeSchedule::disabled(),
            initial_reserve_a: 10_000,
            initial_reserve_b: 1_000,
        };
        registry
            .execute(&pool_id, |pool| engine().initialize(pool, &params))
            .unwrap();
        pool_id
    }

    fn request() -> SwapRequest {
        SwapRequest {
            direction: TradeDirection::AtoB,
            amount_in: 100,
            minimum_amount_out: 0,
            with_host: false,
        }
    }

    #[test]
    fn test_execute_commits_and_bumps_version() {
        let mut registry = PoolRegistry::new();
        let pool_id = initialized(&mut registry);
        assert_eq!(registry.get_pool_state(&pool_id).unwrap().version, 1);

        let transition = registry
            .execute(&pool_id, |pool| engine().swap(pool, &request()))
            .unwrap();
        let stored = registry.get_pool_state(&pool_id).unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(stored.reserve_a, transition.result.new_reserve_a);
    }

    #[test]
    fn test_stale_snapshot_is_rejected() {
        let mut registry = PoolRegistry::new();
        let pool_id = initialized(&mut registry);

        // two writers read the same snapshot
        let snapshot = registry.get_pool_state(&pool_id).unwrap().clone();
        let first = engine().swap(&snapshot, &request()).unwrap();
        let second = engine().swap(&snapshot, &request()).unwrap();

        registry.commit(&pool_id, snapshot.version, first).unwrap();
        assert_swap_error(
            registry.commit(&pool_id, snapshot.version, second),
            SwapError::StaleState,
        );
        assert_eq!(registry.get_pool_state(&pool_id).unwrap().version, 2);
    }

    #[test]
    fn test_failed_operation_leaves_pool_untouched() {
        let mut registry = PoolRegistry::new();
        let pool_id = initialized(&mut registry);
        let before = registry.get_pool_state(&pool_id).unwrap().clone();

        let greedy = SwapRequest {
            minimum_amount_out: 1_000,
            ..request()
        };
        assert_swap_error(
            registry.execute(&pool_id, |pool| engine().swap(pool, &greedy)),
            SwapError::SlippageExceeded,
        );
        assert_eq!(registry.get_pool_state(&pool_id).unwrap(), &before);
    }

    #[test]
    fn test_unknown_and_duplicate_pools() {
        let mut registry = PoolRegistry::new();
        let pool_id = Pubkey::new_unique();
        assert!(registry.get_pool_state(&pool_id).is_none());
        assert_swap_error(
            registry.execute(&pool_id, |pool| engine().swap(pool, &request())),
            SwapError::IncorrectSwapAccount,
        );

        registry.create(pool_id).unwrap();
        assert_swap_error(registry.create(pool_id), SwapError::AlreadyInitialized);
        assert_eq!(registry.len(), 1);
    }
}
