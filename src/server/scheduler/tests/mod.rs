use chrono::Utc;
use entity::payment::PaymentStatus;
use sea_orm::DatabaseConnection;
use starling_test_utils::prelude::*;

use super::*;
