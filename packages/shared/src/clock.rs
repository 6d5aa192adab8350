//! Lamport logical clock.
//!
//! Every process (the server, and each client) owns exactly one clock. The
//! clock advances on every locally-originated event via [`LamportClock::tick`]
//! and is synchronised with peers via [`LamportClock::observe`], so that a
//! received event is always ordered strictly after the event that sent it.

use std::sync::atomic::{AtomicU64, Ordering};

/// A process-wide Lamport clock.
///
/// All operations are single atomic read-modify-write steps, so concurrent
/// callers on different tasks never lose an update and never observe the
/// counter going backwards.
#[derive(Debug, Default)]
pub struct LamportClock {
    counter: AtomicU64,
}

impl LamportClock {
    /// Create a clock starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at the given value.
    pub fn starting_at(value: u64) -> Self {
        Self {
            counter: AtomicU64::new(value),
        }
    }

    /// Current value, without advancing the clock.
    pub fn now(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Advance the clock for a locally-originated event and return the new value.
    ///
    /// Must be called before the value is attached to an outgoing event.
    ///
    /// Saturates at `u64::MAX` instead of wrapping to zero.
    pub fn tick(&self) -> u64 {
        let previous = self
            .counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |local| {
                Some(local.saturating_add(1))
            })
            .unwrap_or_else(|current| current);
        previous.saturating_add(1)
    }

    /// Merge a timestamp received from a peer: `local = max(local, remote) + 1`.
    ///
    /// A peer can send any `u64`, so the increment saturates at `u64::MAX`.
    pub fn observe(&self, remote: u64) -> u64 {
        let previous = self
            .counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |local| {
                Some(local.max(remote).saturating_add(1))
            })
            .unwrap_or_else(|current| current);
        previous.max(remote).saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Receive rule without the increment. Kept only to show why it is wrong.
    fn observe_max_only(local: u64, remote: u64) -> u64 {
        local.max(remote)
    }

    #[test]
    fn test_new_clock_starts_at_zero() {
        // テスト項目: 新しいクロックは 0 から始まる
        // given (前提条件):
        let clock = LamportClock::new();

        // when (操作):
        let now = clock.now();

        // then (期待する結果):
        assert_eq!(now, 0);
    }

    #[test]
    fn test_tick_increments_by_one() {
        // テスト項目: tick は 1 ずつ進み、新しい値を返す
        // given (前提条件):
        let clock = LamportClock::new();

        // when (操作):
        let first = clock.tick();
        let second = clock.tick();

        // then (期待する結果):
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(clock.now(), 2);
    }

    #[test]
    fn test_observe_ahead_remote_jumps_past_it() {
        // テスト項目: ローカルより大きいタイムスタンプを受信すると remote + 1 になる
        // given (前提条件):
        let clock = LamportClock::starting_at(3);

        // when (操作):
        let value = clock.observe(10);

        // then (期待する結果):
        assert_eq!(value, 11);
        assert_eq!(clock.now(), 11);
    }

    #[test]
    fn test_observe_stale_remote_still_advances() {
        // テスト項目: 古いタイムスタンプを受信してもローカルは 1 進む
        // given (前提条件):
        let clock = LamportClock::starting_at(20);

        // when (操作):
        let value = clock.observe(5);

        // then (期待する結果):
        assert_eq!(value, 21);
    }

    #[test]
    fn test_sequence_of_ticks_and_observes_is_strictly_increasing() {
        // テスト項目: tick / observe の戻り値は常に狭義単調増加する
        // given (前提条件):
        let clock = LamportClock::new();
        let remotes = [0, 7, 3, 3, 100, 2, 101];

        // when (操作):
        let mut values = Vec::new();
        for remote in remotes {
            values.push(clock.tick());
            values.push(clock.observe(remote));
        }

        // then (期待する結果):
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_received_event_is_ordered_after_send() {
        // テスト項目: 送信イベントより受信イベントのタイムスタンプが必ず大きい（因果順序）
        // given (前提条件): 送信側と受信側が同じ値に揃っている
        let sender = LamportClock::starting_at(4);
        let receiver = LamportClock::starting_at(5);

        // when (操作):
        let sent_at = sender.tick();
        let received_at = receiver.observe(sent_at);
        let reply_at = receiver.tick();
        let reply_received_at = sender.observe(reply_at);

        // then (期待する結果):
        assert!(sent_at < received_at);
        assert!(received_at < reply_at);
        assert!(reply_at < reply_received_at);
    }

    #[test]
    fn test_max_only_rule_fails_to_order_receive_after_send() {
        // テスト項目: max のみの更新則では受信が送信と同じ時刻になってしまう（欠陥の確認）
        // given (前提条件):
        let sender = LamportClock::starting_at(4);
        let receiver_local = 2;
        let sent_at = sender.tick();

        // when (操作):
        let defective = observe_max_only(receiver_local, sent_at);
        let correct = LamportClock::starting_at(receiver_local).observe(sent_at);

        // then (期待する結果):
        assert_eq!(defective, sent_at);
        assert!(correct > sent_at);
    }

    #[test]
    fn test_concurrent_updates_are_never_lost() {
        // テスト項目: 複数スレッドから同時に tick しても更新が失われない
        // given (前提条件):
        let clock = Arc::new(LamportClock::new());
        let threads = 8;
        let ticks_per_thread = 1_000;

        // when (操作):
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let clock = Arc::clone(&clock);
                std::thread::spawn(move || {
                    let mut last = 0;
                    for _ in 0..ticks_per_thread {
                        let value = clock.tick();
                        assert!(value > last);
                        last = value;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // then (期待する結果):
        assert_eq!(clock.now(), threads * ticks_per_thread);
    }

    #[test]
    fn test_concurrent_observe_returns_distinct_values() {
        // テスト項目: 同時 observe でも返る値はすべて異なる
        // given (前提条件):
        let clock = Arc::new(LamportClock::new());

        // when (操作):
        let handles: Vec<_> = (0..4u64)
            .map(|i| {
                let clock = Arc::clone(&clock);
                std::thread::spawn(move || {
                    (0..250).map(|_| clock.observe(i)).collect::<Vec<_>>()
                })
            })
            .collect();
        let mut values: Vec<u64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();

        // then (期待する結果):
        let total = values.len();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), total);
    }

    #[test]
    fn test_observe_of_max_timestamp_saturates() {
        // テスト項目: u64::MAX を受信してもパニックせず、クロックは巻き戻らない
        // given (前提条件):
        let clock = LamportClock::starting_at(10);

        // when (操作):
        let observed = clock.observe(u64::MAX);
        let ticked = clock.tick();
        let observed_again = clock.observe(3);

        // then (期待する結果):
        assert_eq!(observed, u64::MAX);
        assert_eq!(ticked, u64::MAX);
        assert_eq!(observed_again, u64::MAX);
        assert_eq!(clock.now(), u64::MAX);
    }
}
