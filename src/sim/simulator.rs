//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间、事件队列以及已取消的定时器。

use super::event::Event;
use super::scheduled_event::{ScheduledEvent, TimerId};
use super::time::SimTime;
use super::world::World;
use std::collections::{BinaryHeap, HashSet};
use tracing::{debug, info, trace};

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
    cancelled: HashSet<u64>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 尚未执行且未被取消的事件数
    pub fn pending(&self) -> usize {
        self.q.len() - self.cancelled.len()
    }

    /// 调度事件在指定时间执行，返回可用于取消的句柄
    #[tracing::instrument(skip(self, ev), fields(event_type = ev.name(), schedule_at = %at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) -> TimerId {
        let seq = self.next_seq;
        trace!(now = %self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });

        debug!(queue_size = self.q.len(), "事件已加入队列");
        TimerId(seq)
    }

    /// 取消一个尚未执行的事件。事件已执行或句柄未知时返回 false。
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if self.cancelled.contains(&id.0) || !self.q.iter().any(|item| item.seq == id.0) {
            return false;
        }
        self.cancelled.insert(id.0);
        debug!(seq = id.0, "取消定时器");
        true
    }

    /// 弹出下一个未取消的事件，且其时间不晚于 `until`（若给定）。
    fn pop_due(&mut self, until: Option<SimTime>) -> Option<ScheduledEvent> {
        while let Some(top) = self.q.peek() {
            if until.is_some_and(|until| top.at > until) {
                return None;
            }
            let item = self.q.pop()?;
            if self.cancelled.remove(&item.seq) {
                trace!(seq = item.seq, "跳过已取消事件");
                continue;
            }
            return Some(item);
        }
        None
    }

    /// 运行直到事件队列为空或到达 `until`。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        while let Some(item) = self.pop_due(Some(until)) {
            self.now = item.at;
            item.ev.execute(self, world);
            world.on_tick(self);
        }
        self.now = self.now.max(until);
    }

    /// 运行所有事件直到队列为空。周期事件必须先被取消，否则不会返回。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        info!("▶️  开始运行仿真");
        debug!(now = %self.now, queue_size = self.q.len(), "初始状态");

        let mut event_count = 0u64;
        while let Some(item) = self.pop_due(None) {
            event_count += 1;
            self.now = item.at;

            debug!(
                event_num = event_count,
                now = %self.now,
                seq = item.seq,
                remaining_queue = self.q.len(),
                "执行事件"
            );

            item.ev.execute(self, world);
            world.on_tick(self);
        }

        info!(
            total_events = event_count,
            final_time = %self.now,
            "✅ 仿真完成"
        );
    }
}
