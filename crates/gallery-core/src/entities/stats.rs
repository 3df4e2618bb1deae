//! Feedback aggregates computed from the feedback rows of a photo or event

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::entities::{Feedback, FeedbackType};

/// Denormalized counters stored on a photo.
///
/// Only visible (non-hidden) rows contribute. Recomputing from the same rows
/// always yields the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoStats {
    pub comment_count: i32,
    pub like_count: i32,
    pub favorite_count: i32,
    pub average_rating: f64,
    pub feedback_count: i32,
}

impl PhotoStats {
    pub fn from_feedback<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Feedback>,
    {
        let mut stats = Self::default();
        let mut rating_sum = 0i64;
        let mut rating_count = 0i64;
        let mut guests = HashSet::new();

        for row in rows.into_iter().filter(|r| r.is_visible()) {
            guests.insert(row.guest_identifier.as_str());
            match row.feedback_type {
                FeedbackType::Like => stats.like_count += 1,
                FeedbackType::Favorite => stats.favorite_count += 1,
                FeedbackType::Comment if row.is_approved => stats.comment_count += 1,
                FeedbackType::Comment => {}
                FeedbackType::Rating => {
                    if let Some(r) = row.rating {
                        rating_sum += i64::from(r);
                        rating_count += 1;
                    }
                }
            }
        }

        stats.feedback_count = guests.len() as i32;
        stats.average_rating = mean(rating_sum, rating_count);
        stats
    }
}

/// Event-wide totals for the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFeedbackSummary {
    pub total_feedback: i64,
    pub total_likes: i64,
    pub total_favorites: i64,
    pub total_comments: i64,
    pub pending_comments: i64,
    pub total_ratings: i64,
    pub average_rating: f64,
    pub unique_guests: i64,
}

impl EventFeedbackSummary {
    pub fn from_feedback<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Feedback>,
    {
        let mut summary = Self::default();
        let mut rating_sum = 0i64;
        let mut guests = HashSet::new();

        for row in rows.into_iter().filter(|r| r.is_visible()) {
            summary.total_feedback += 1;
            guests.insert(row.guest_identifier.as_str());
            match row.feedback_type {
                FeedbackType::Like => summary.total_likes += 1,
                FeedbackType::Favorite => summary.total_favorites += 1,
                FeedbackType::Comment if row.is_approved => summary.total_comments += 1,
                FeedbackType::Comment => summary.pending_comments += 1,
                FeedbackType::Rating => {
                    if let Some(r) = row.rating {
                        rating_sum += i64::from(r);
                        summary.total_ratings += 1;
                    }
                }
            }
        }

        summary.unique_guests = guests.len() as i64;
        summary.average_rating = mean(rating_sum, summary.total_ratings);
        summary
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: i64, count: i64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
