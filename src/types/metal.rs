use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A metal tracked through the plant
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Metal {
    Cu,
    Pd,
    Pt,
    Au,
    Ni,
    Co,
}

impl Metal {
    /// All tracked metals in reporting order
    pub const ALL: [Metal; 6] = [Metal::Cu, Metal::Pd, Metal::Pt, Metal::Au, Metal::Ni, Metal::Co];

    /// Platinum-group metals (plus gold) that are distributed between the two flotation concentrates
    pub const PGM: [Metal; 3] = [Metal::Pd, Metal::Pt, Metal::Au];

    pub fn symbol(&self) -> &'static str {
        match self {
            Metal::Cu => "Cu",
            Metal::Pd => "Pd",
            Metal::Pt => "Pt",
            Metal::Au => "Au",
            Metal::Ni => "Ni",
            Metal::Co => "Co",
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One value per tracked metal.
///
/// Used for feed grades (percent of ore mass), metal flows (mass/time) and
/// unit prices. Named fields keep every access compile-time checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetalAmounts {
    pub cu: f64,
    pub pd: f64,
    pub pt: f64,
    pub au: f64,
    pub ni: f64,
    pub co: f64,
}

impl MetalAmounts {
    pub fn new(cu: f64, pd: f64, pt: f64, au: f64, ni: f64, co: f64) -> Self {
        Self { cu, pd, pt, au, ni, co }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, metal: Metal) -> f64 {
        match metal {
            Metal::Cu => self.cu,
            Metal::Pd => self.pd,
            Metal::Pt => self.pt,
            Metal::Au => self.au,
            Metal::Ni => self.ni,
            Metal::Co => self.co,
        }
    }

    pub fn set(&mut self, metal: Metal, value: f64) {
        match metal {
            Metal::Cu => self.cu = value,
            Metal::Pd => self.pd = value,
            Metal::Pt => self.pt = value,
            Metal::Au => self.au = value,
            Metal::Ni => self.ni = value,
            Metal::Co => self.co = value,
        }
    }

    /// Applies `f` to every metal, producing a new record
    pub fn map<F: Fn(Metal, f64) -> f64>(&self, f: F) -> Self {
        let mut out = Self::zero();
        for metal in Metal::ALL {
            out.set(metal, f(metal, self.get(metal)));
        }
        out
    }

    pub fn scale(&self, factor: f64) -> Self {
        self.map(|_, value| value * factor)
    }

    /// Element-wise product, e.g. metal flows times unit prices
    pub fn weighted_sum(&self, weights: &MetalAmounts) -> f64 {
        Metal::ALL.iter().map(|m| self.get(*m) * weights.get(*m)).sum()
    }

    pub fn total(&self) -> f64 {
        Metal::ALL.iter().map(|m| self.get(*m)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metal, f64)> + '_ {
        Metal::ALL.iter().map(move |m| (*m, self.get(*m)))
    }
}

impl Add for MetalAmounts {
    type Output = MetalAmounts;

    fn add(self, rhs: MetalAmounts) -> MetalAmounts {
        self.map(|metal, value| value + rhs.get(metal))
    }
}

impl Sub for MetalAmounts {
    type Output = MetalAmounts;

    fn sub(self, rhs: MetalAmounts) -> MetalAmounts {
        self.map(|metal, value| value - rhs.get(metal))
    }
}
