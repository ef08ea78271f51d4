use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::{notifications, organisers};

/// Private view, returned to the organiser themself.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrganiserSchema {
    pub id: String,
    pub username: String,
    pub email: String,
    pub total_revenue: i64,
    pub rating: f64,
    pub rating_count: i32,
    pub show_revenue: bool,
    pub show_followers: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
}

impl From<organisers::Model> for OrganiserSchema {
    fn from(organiser: organisers::Model) -> Self {
        Self {
            id: organiser.id,
            username: organiser.username,
            email: organiser.email,
            total_revenue: organiser.total_revenue,
            rating: organiser.rating,
            rating_count: organiser.rating_count,
            show_revenue: organiser.show_revenue,
            show_followers: organiser.show_followers,
            banned: organiser.banned,
            created_at: organiser.created_at.to_utc(),
        }
    }
}

/// Public profile. Hidden fields are `None` per the organiser's visibility settings.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrganiserProfileSchema {
    pub id: String,
    pub username: String,
    pub rating: f64,
    pub rating_count: i32,
    pub tournaments_hosted: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrganiserDashboardSchema {
    pub id: String,
    pub username: String,
    pub total_revenue: i64,
    pub rating: f64,
    pub followers: u64,
    pub pending_tournaments: u64,
    pub approved_tournaments: u64,
    pub completed_tournaments: u64,
    pub unread_notifications: u64,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSchema {
    pub id: i32,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<notifications::Model> for NotificationSchema {
    fn from(notification: notifications::Model) -> Self {
        Self {
            id: notification.id,
            message: notification.message,
            read: notification.read,
            created_at: notification.created_at.to_utc(),
        }
    }
}
