//! 可注入随机源
//!
//! 每次抽样都带上用途（`Draw`），脚本化随机源可以据此单独控制某一类抽样，
//! 从而确定性地覆盖状态机的每个分支。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, VecDeque};

/// 一次随机抽样的用途
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Draw {
    Protocol,
    Loss,
    BurstEnter,
    BurstExit,
    Retransmit,
    Size,
}

/// 随机源：返回 `[0, 1)` 内的值。抛硬币在 `sample < p` 时判定为命中。
pub trait RandomSource {
    fn sample(&mut self, draw: Draw) -> f64;

    fn chance(&mut self, draw: Draw, p: f64) -> bool {
        self.sample(draw) < p
    }
}

/// 基于 `rand` 生成器的随机源
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// 可复现的随机源
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn sample(&mut self, _draw: Draw) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// 永不命中的抽样值（对任意 `p < 1` 都不触发）。
const NEVER: f64 = 0.999_999;

/// 脚本化随机源：按用途排队的固定值，队列空时使用该用途的兜底值。
///
/// 默认兜底：协议与包长取 0.0（RTP、100 字节），其余抛硬币一律不命中。
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    queued: HashMap<Draw, VecDeque<f64>>,
    fallback: HashMap<Draw, f64>,
    taken: HashMap<Draw, usize>,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        let fallback = HashMap::from([
            (Draw::Protocol, 0.0),
            (Draw::Loss, NEVER),
            (Draw::BurstEnter, NEVER),
            (Draw::BurstExit, NEVER),
            (Draw::Retransmit, NEVER),
            (Draw::Size, 0.0),
        ]);
        Self {
            queued: HashMap::new(),
            fallback,
            taken: HashMap::new(),
        }
    }
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 某用途的所有后续抽样都返回 `value`（排队值优先）
    pub fn always(mut self, draw: Draw, value: f64) -> Self {
        self.fallback.insert(draw, value);
        self
    }

    /// 某用途的抛硬币总是命中
    pub fn always_fire(self, draw: Draw) -> Self {
        self.always(draw, 0.0)
    }

    /// 某用途的抛硬币从不命中
    pub fn never_fire(self, draw: Draw) -> Self {
        self.always(draw, NEVER)
    }

    /// 依次排入若干值，用完后回落到兜底值
    pub fn then(mut self, draw: Draw, values: impl IntoIterator<Item = f64>) -> Self {
        self.queued.entry(draw).or_default().extend(values);
        self
    }

    /// 某用途已被抽样的次数
    pub fn taken(&self, draw: Draw) -> usize {
        self.taken.get(&draw).copied().unwrap_or(0)
    }
}

impl RandomSource for ScriptedSource {
    fn sample(&mut self, draw: Draw) -> f64 {
        *self.taken.entry(draw).or_insert(0) += 1;
        if let Some(v) = self.queued.get_mut(&draw).and_then(VecDeque::pop_front) {
            return v;
        }
        self.fallback.get(&draw).copied().unwrap_or(NEVER)
    }
}
