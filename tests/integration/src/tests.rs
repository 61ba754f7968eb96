//! Integration tests for the fairdraw protocol.
//!
//! These tests exercise the contract entry points directly using
//! `cosmwasm_std::testing` mocks. Each contract runs against its own
//! mock storage; cross-contract messages (the raffle's randomness
//! request and the coordinator's fulfilment callback) are relayed by
//! hand, deserializing the emitted `WasmMsg` and executing it on the
//! counterparty with the correct sender.
//!
//! Run:
//! ```bash
//! cargo test -p fairdraw-integration-tests
//! ```

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coins, from_json, Addr, BankMsg, Binary, CosmosMsg, Env, OwnedDeps, Response, Uint128,
    Uint256, WasmMsg,
};
use fairdraw_common::randomness::derive_random_words;

use fairdraw_raffle::error::ContractError as RaffleError;
use fairdraw_raffle::state::{PendingRequest, RaffleLifecycle, RaffleStats, Round};
use fairdraw_vrf_coordinator::error::ContractError as CoordinatorError;

type MockDeps = OwnedDeps<cosmwasm_std::MemoryStorage, MockApi, MockQuerier>;

// ─── Constants ───

const ENTRANCE_FEE: u128 = 100;
const INTERVAL_SECONDS: u64 = 30;
const DENOM: &str = "uatom";
const CALLBACK_GAS_LIMIT: u64 = 500_000;

// ─── Raffle helpers ───

fn coordinator_addr() -> Addr {
    MockApi::default().addr_make("vrf_coordinator")
}

/// The raffle's own on-chain address under the mock env. This is the
/// consumer address the coordinator sees and derives words from.
fn raffle_addr() -> Addr {
    mock_env().contract.address
}

fn setup_raffle(deps: &mut MockDeps) {
    let admin = deps.api.addr_make("admin");
    let msg = fairdraw_raffle::msg::InstantiateMsg {
        vrf_coordinator: coordinator_addr().to_string(),
        entrance_fee: Uint128::new(ENTRANCE_FEE),
        prize_denom: DENOM.to_string(),
        interval_seconds: INTERVAL_SECONDS,
        callback_gas_limit: CALLBACK_GAS_LIMIT,
    };
    let info = message_info(&admin, &[]);
    fairdraw_raffle::contract::instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
}

fn enter(deps: &mut MockDeps, player: &str, amount: u128) {
    let addr = deps.api.addr_make(player);
    let info = message_info(&addr, &coins(amount, DENOM));
    fairdraw_raffle::contract::execute(
        deps.as_mut(),
        mock_env(),
        info,
        fairdraw_raffle::msg::ExecuteMsg::Enter {},
    )
    .unwrap();
}

/// Mock env with the block time advanced `seconds` past instantiation.
fn env_plus(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = env.block.time.plus_seconds(seconds);
    env
}

fn env_after_interval() -> Env {
    env_plus(INTERVAL_SECONDS + 1)
}

// ─── Coordinator helpers ───

fn setup_coordinator(deps: &mut MockDeps) {
    let admin = deps.api.addr_make("admin");
    let operator = deps.api.addr_make("operator");
    let msg = fairdraw_vrf_coordinator::msg::InstantiateMsg {
        operators: vec![operator.to_string()],
    };
    let info = message_info(&admin, &[]);
    fairdraw_vrf_coordinator::contract::instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
}

// ─── Relay helpers ───

/// Pull the single `WasmMsg::Execute` out of a response.
fn extract_wasm_execute(res: &Response) -> (String, Binary) {
    assert_eq!(res.messages.len(), 1, "expected exactly one message");
    match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr, msg, ..
        }) => (contract_addr.clone(), msg.clone()),
        other => panic!("expected wasm execute message, got {:?}", other),
    }
}

/// Trigger a draw on the raffle and relay the randomness request to the
/// coordinator, returning the request id carried on the wire.
fn relay_draw_request(raffle: &mut MockDeps, coordinator: &mut MockDeps, env: Env) -> u64 {
    let caller = raffle.api.addr_make("keeper");
    let res = fairdraw_raffle::contract::execute(
        raffle.as_mut(),
        env,
        message_info(&caller, &[]),
        fairdraw_raffle::msg::ExecuteMsg::PerformUpkeep {},
    )
    .unwrap();

    let (target, wire) = extract_wasm_execute(&res);
    assert_eq!(target, coordinator_addr().to_string());

    let request: fairdraw_vrf_coordinator::msg::ExecuteMsg = from_json(&wire).unwrap();
    let request_id = match &request {
        fairdraw_vrf_coordinator::msg::ExecuteMsg::RequestRandomWords {
            request_id,
            num_words,
            request_confirmations,
            callback_gas_limit,
        } => {
            assert_eq!(*num_words, 1);
            assert_eq!(*request_confirmations, 3);
            assert_eq!(*callback_gas_limit, CALLBACK_GAS_LIMIT);
            *request_id
        }
        other => panic!("unexpected coordinator message: {:?}", other),
    };

    // The raffle contract is the sender the coordinator sees.
    fairdraw_vrf_coordinator::contract::execute(
        coordinator.as_mut(),
        mock_env(),
        message_info(&raffle_addr(), &[]),
        request,
    )
    .unwrap();

    request_id
}

/// Have the operator fulfil a request on the coordinator and return the
/// callback destined for the raffle.
fn operator_fulfill(coordinator: &mut MockDeps, request_id: u64) -> fairdraw_raffle::msg::ExecuteMsg {
    let operator = coordinator.api.addr_make("operator");
    let res = fairdraw_vrf_coordinator::contract::execute(
        coordinator.as_mut(),
        mock_env(),
        message_info(&operator, &[]),
        fairdraw_vrf_coordinator::msg::ExecuteMsg::FulfillRandomWords {
            consumer: raffle_addr().to_string(),
            request_id,
        },
    )
    .unwrap();

    let (target, wire) = extract_wasm_execute(&res);
    assert_eq!(target, raffle_addr().to_string());
    from_json(&wire).unwrap()
}

/// Winner slot the raffle must select for a given request and player count.
fn expected_winner_index(request_id: u64, num_players: u64) -> usize {
    let word = derive_random_words(raffle_addr().as_str(), request_id, 1)[0];
    let index = word % Uint256::from(num_players);
    Uint128::try_from(index).unwrap().u128() as usize
}

fn query_lifecycle(deps: &MockDeps) -> RaffleLifecycle {
    from_json(
        fairdraw_raffle::contract::query(
            deps.as_ref(),
            mock_env(),
            fairdraw_raffle::msg::QueryMsg::Lifecycle {},
        )
        .unwrap(),
    )
    .unwrap()
}

fn query_round(deps: &MockDeps) -> Round {
    from_json(
        fairdraw_raffle::contract::query(
            deps.as_ref(),
            mock_env(),
            fairdraw_raffle::msg::QueryMsg::Round {},
        )
        .unwrap(),
    )
    .unwrap()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_round_settles_through_coordinator() {
    let mut raffle = mock_dependencies();
    let mut coordinator = mock_dependencies();
    setup_raffle(&mut raffle);
    setup_coordinator(&mut coordinator);

    let players = ["alice", "bob", "carol", "dave"];
    for p in players {
        enter(&mut raffle, p, ENTRANCE_FEE);
    }

    let request_id = relay_draw_request(&mut raffle, &mut coordinator, env_after_interval());
    assert_eq!(request_id, 1);
    assert_eq!(query_lifecycle(&raffle), RaffleLifecycle::Calculating);

    let callback = operator_fulfill(&mut coordinator, request_id);

    // Fund the raffle with the pot so the payout balance check passes.
    let pot = ENTRANCE_FEE * players.len() as u128;
    raffle
        .querier
        .bank
        .update_balance(raffle_addr(), coins(pot, DENOM));

    let res = fairdraw_raffle::contract::execute(
        raffle.as_mut(),
        env_after_interval(),
        message_info(&coordinator_addr(), &[]),
        callback,
    )
    .unwrap();

    let winner = raffle
        .api
        .addr_make(players[expected_winner_index(request_id, players.len() as u64)]);

    assert_eq!(res.messages.len(), 1);
    match &res.messages[0].msg {
        CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
            assert_eq!(to_address, winner.as_str());
            assert_eq!(amount, &coins(pot, DENOM));
        }
        other => panic!("expected bank send, got {:?}", other),
    }

    // Round reset for the next cycle.
    assert_eq!(query_lifecycle(&raffle), RaffleLifecycle::Open);
    let round = query_round(&raffle);
    assert!(round.players.is_empty());
    assert_eq!(round.prize_pool, Uint128::zero());

    let recent: Option<Addr> = from_json(
        fairdraw_raffle::contract::query(
            raffle.as_ref(),
            mock_env(),
            fairdraw_raffle::msg::QueryMsg::RecentWinner {},
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(recent, Some(winner));

    let stats: RaffleStats = from_json(
        fairdraw_raffle::contract::query(
            raffle.as_ref(),
            mock_env(),
            fairdraw_raffle::msg::QueryMsg::Stats {},
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(stats.rounds_settled, 1);
    assert_eq!(stats.total_paid_out, Uint128::new(pot));
}

#[test]
fn test_single_player_wins_own_entry() {
    let mut raffle = mock_dependencies();
    let mut coordinator = mock_dependencies();
    setup_raffle(&mut raffle);
    setup_coordinator(&mut coordinator);

    enter(&mut raffle, "alice", ENTRANCE_FEE);

    let request_id = relay_draw_request(&mut raffle, &mut coordinator, env_after_interval());
    let callback = operator_fulfill(&mut coordinator, request_id);

    raffle
        .querier
        .bank
        .update_balance(raffle_addr(), coins(ENTRANCE_FEE, DENOM));

    let res = fairdraw_raffle::contract::execute(
        raffle.as_mut(),
        env_after_interval(),
        message_info(&coordinator_addr(), &[]),
        callback,
    )
    .unwrap();

    // Any word mod 1 selects the sole entrant.
    let alice = raffle.api.addr_make("alice");
    match &res.messages[0].msg {
        CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
            assert_eq!(to_address, alice.as_str());
            assert_eq!(amount, &coins(ENTRANCE_FEE, DENOM));
        }
        other => panic!("expected bank send, got {:?}", other),
    }
}

#[test]
fn test_stale_callback_rejected_after_settlement() {
    let mut raffle = mock_dependencies();
    let mut coordinator = mock_dependencies();
    setup_raffle(&mut raffle);
    setup_coordinator(&mut coordinator);

    enter(&mut raffle, "alice", ENTRANCE_FEE);
    enter(&mut raffle, "bob", ENTRANCE_FEE);

    let request_id = relay_draw_request(&mut raffle, &mut coordinator, env_after_interval());
    let callback = operator_fulfill(&mut coordinator, request_id);

    raffle
        .querier
        .bank
        .update_balance(raffle_addr(), coins(2 * ENTRANCE_FEE, DENOM));

    fairdraw_raffle::contract::execute(
        raffle.as_mut(),
        env_after_interval(),
        message_info(&coordinator_addr(), &[]),
        callback.clone(),
    )
    .unwrap();

    // Replaying the consumed request must fail and leave the new round open.
    let err = fairdraw_raffle::contract::execute(
        raffle.as_mut(),
        env_after_interval(),
        message_info(&coordinator_addr(), &[]),
        callback,
    )
    .unwrap_err();
    assert!(matches!(err, RaffleError::UnknownRequest { request_id: 1 }));
    assert_eq!(query_lifecycle(&raffle), RaffleLifecycle::Open);
}

#[test]
fn test_coordinator_fulfills_exactly_once() {
    let mut raffle = mock_dependencies();
    let mut coordinator = mock_dependencies();
    setup_raffle(&mut raffle);
    setup_coordinator(&mut coordinator);

    enter(&mut raffle, "alice", ENTRANCE_FEE);
    let request_id = relay_draw_request(&mut raffle, &mut coordinator, env_after_interval());
    operator_fulfill(&mut coordinator, request_id);

    let operator = coordinator.api.addr_make("operator");
    let err = fairdraw_vrf_coordinator::contract::execute(
        coordinator.as_mut(),
        mock_env(),
        message_info(&operator, &[]),
        fairdraw_vrf_coordinator::msg::ExecuteMsg::FulfillRandomWords {
            consumer: raffle_addr().to_string(),
            request_id,
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CoordinatorError::RequestAlreadyFulfilled { request_id: 1 }
    ));
}

#[test]
fn test_payout_failure_keeps_round_calculating() {
    let mut raffle = mock_dependencies();
    let mut coordinator = mock_dependencies();
    setup_raffle(&mut raffle);
    setup_coordinator(&mut coordinator);

    enter(&mut raffle, "alice", ENTRANCE_FEE);
    enter(&mut raffle, "bob", ENTRANCE_FEE);

    let request_id = relay_draw_request(&mut raffle, &mut coordinator, env_after_interval());
    let callback = operator_fulfill(&mut coordinator, request_id);

    // No bank balance set: the payout check fails and nothing settles.
    let err = fairdraw_raffle::contract::execute(
        raffle.as_mut(),
        env_after_interval(),
        message_info(&coordinator_addr(), &[]),
        callback.clone(),
    )
    .unwrap_err();
    assert!(matches!(err, RaffleError::PayoutFailed { .. }));

    assert_eq!(query_lifecycle(&raffle), RaffleLifecycle::Calculating);
    let pending: Option<PendingRequest> = from_json(
        fairdraw_raffle::contract::query(
            raffle.as_ref(),
            mock_env(),
            fairdraw_raffle::msg::QueryMsg::PendingRequest {},
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(pending.map(|p| p.request_id), Some(request_id));

    // Once funded, the same delivery settles the round.
    raffle
        .querier
        .bank
        .update_balance(raffle_addr(), coins(2 * ENTRANCE_FEE, DENOM));
    fairdraw_raffle::contract::execute(
        raffle.as_mut(),
        env_after_interval(),
        message_info(&coordinator_addr(), &[]),
        callback,
    )
    .unwrap();
    assert_eq!(query_lifecycle(&raffle), RaffleLifecycle::Open);
}

#[test]
fn test_request_ids_increment_across_rounds() {
    let mut raffle = mock_dependencies();
    let mut coordinator = mock_dependencies();
    setup_raffle(&mut raffle);
    setup_coordinator(&mut coordinator);

    enter(&mut raffle, "alice", ENTRANCE_FEE);
    let first = relay_draw_request(&mut raffle, &mut coordinator, env_after_interval());
    assert_eq!(first, 1);

    let callback = operator_fulfill(&mut coordinator, first);
    raffle
        .querier
        .bank
        .update_balance(raffle_addr(), coins(ENTRANCE_FEE, DENOM));
    fairdraw_raffle::contract::execute(
        raffle.as_mut(),
        env_after_interval(),
        message_info(&coordinator_addr(), &[]),
        callback,
    )
    .unwrap();

    // Next round draws with a fresh id; the coordinator keys requests by
    // (consumer, id) so the pair never collides.
    enter(&mut raffle, "bob", ENTRANCE_FEE);
    let second = relay_draw_request(
        &mut raffle,
        &mut coordinator,
        env_plus(2 * (INTERVAL_SECONDS + 1)),
    );
    assert_eq!(second, 2);

    let total: u64 = from_json(
        fairdraw_vrf_coordinator::contract::query(
            coordinator.as_ref(),
            mock_env(),
            fairdraw_vrf_coordinator::msg::QueryMsg::TotalRequests {},
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(total, 2);
}
