use crate::answer_validator::ScoreSummary;
use chrono::{DateTime, Duration, Utc};
use log::debug;

/// How long a banner stays up unless closed first
pub const DEFAULT_DISPLAY_SECONDS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerTier {
    Perfect,
    Excellent,
    Great,
    Good,
    Encouragement,
    TryAgain,
}

impl BannerTier {
    /// First matching threshold wins; a perfect score beats any percentage
    pub fn for_summary(summary: &ScoreSummary) -> Self {
        if summary.is_perfect() {
            return BannerTier::Perfect;
        }
        match summary.percentage {
            90.. => BannerTier::Excellent,
            80..=89 => BannerTier::Great,
            70..=79 => BannerTier::Good,
            60..=69 => BannerTier::Encouragement,
            _ => BannerTier::TryAgain,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BannerTier::Perfect => "🎉 Congratulations! All answers are correct!",
            BannerTier::Excellent => "🌟 Excellent work!",
            BannerTier::Great => "👏 Great job!",
            BannerTier::Good => "👍 Good effort!",
            BannerTier::Encouragement => "💪 Keep practicing, you're getting there!",
            BannerTier::TryAgain => "📚 Don't give up, try again!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BannerId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub id: BannerId,
    pub tier: BannerTier,
    pub shown_at: DateTime<Utc>,
    pub dismiss_at: DateTime<Utc>,
}

impl Banner {
    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}

/// Holds at most one banner. Pending dismissals are keyed to the banner id,
/// so closing or expiring an old banner can never clear a newer one.
#[derive(Debug)]
pub struct BannerSlot {
    current: Option<Banner>,
    next_id: u64,
    display_duration: Duration,
}

impl Default for BannerSlot {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_DISPLAY_SECONDS))
    }
}

impl BannerSlot {
    pub fn new(display_duration: Duration) -> Self {
        Self {
            current: None,
            next_id: 0,
            display_duration,
        }
    }

    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }

    /// Replaces whatever banner is showing
    pub fn show(&mut self, tier: BannerTier, now: DateTime<Utc>) -> BannerId {
        self.next_id += 1;
        let id = BannerId(self.next_id);
        self.current = Some(Banner {
            id,
            tier,
            shown_at: now,
            dismiss_at: now + self.display_duration,
        });
        debug!("Showing banner {:?} ({:?})", id, tier);
        id
    }

    /// Explicit close. Returns false when `id` is no longer the current banner.
    pub fn dismiss(&mut self, id: BannerId) -> bool {
        match &self.current {
            Some(banner) if banner.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Clears the current banner once its own deadline has passed
    pub fn expire(&mut self, now: DateTime<Utc>) -> Option<BannerId> {
        let expired = self
            .current
            .as_ref()
            .filter(|banner| banner.dismiss_at <= now)
            .map(|banner| banner.id)?;
        self.current = None;
        debug!("Banner {:?} auto-dismissed", expired);
        Some(expired)
    }

    /// Time left before auto-dismissal, if a banner is showing
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|banner| (banner.dismiss_at - now).max(Duration::zero()))
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
