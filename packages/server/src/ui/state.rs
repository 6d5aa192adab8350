//! Shared application state.

use std::sync::Arc;

use tokei_shared::{clock::LamportClock, time::SystemClock};

use crate::{
    config::ServerConfig,
    domain::{RosterRepository, SessionRegistry},
    infrastructure::{registry::InMemorySessionRegistry, repository::InMemoryRosterRepository},
    usecase::{
        BroadcastRouter, ChatRouteUseCase, ConnectUseCase, DepartureLedger, DisconnectUseCase,
        GetServerStateUseCase,
    },
};

/// Shared application state, handed to every handler
pub struct AppState {
    /// ConnectUseCase（参加のユースケース）
    pub connect_usecase: Arc<ConnectUseCase>,
    /// DisconnectUseCase（退出のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// ChatRouteUseCase（チャットストリームのユースケース）
    pub chat_route_usecase: Arc<ChatRouteUseCase>,
    /// GetServerStateUseCase（サーバー状態取得のユースケース）
    pub get_server_state_usecase: Arc<GetServerStateUseCase>,
    pub config: ServerConfig,
}

impl AppState {
    /// Wire every layer together around one clock, one registry and one roster.
    ///
    /// Dependencies are created in order:
    /// 1. Clock
    /// 2. Repository and registry
    /// 3. Broadcast router and departure ledger
    /// 4. UseCases
    pub fn in_memory(config: ServerConfig) -> Self {
        // 1. Lamport clock (one per server process)
        let clock = Arc::new(LamportClock::new());

        // 2. Roster repository and session registry
        let roster: Arc<dyn RosterRepository> = Arc::new(InMemoryRosterRepository::new());
        let registry: Arc<dyn SessionRegistry> = Arc::new(InMemorySessionRegistry::new());

        // 3. Broadcast router and departure ledger
        let router = Arc::new(BroadcastRouter::new(clock.clone(), registry.clone()));
        let departures = Arc::new(DepartureLedger::new());

        // 4. UseCases
        let connect_usecase = Arc::new(ConnectUseCase::new(
            clock.clone(),
            roster.clone(),
            router.clone(),
            Arc::new(SystemClock),
        ));
        let disconnect_usecase = Arc::new(DisconnectUseCase::new(
            clock.clone(),
            roster.clone(),
            registry.clone(),
            router.clone(),
            departures.clone(),
        ));
        let chat_route_usecase = Arc::new(ChatRouteUseCase::new(
            clock.clone(),
            roster.clone(),
            registry.clone(),
            router,
            departures,
        ));
        let get_server_state_usecase =
            Arc::new(GetServerStateUseCase::new(clock, roster, registry));

        Self {
            connect_usecase,
            disconnect_usecase,
            chat_route_usecase,
            get_server_state_usecase,
            config,
        }
    }
}
