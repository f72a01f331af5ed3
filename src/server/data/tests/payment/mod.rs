use chrono::{Duration, Utc};
use entity::payment::PaymentStatus;
use starling_test_utils::prelude::*;

use crate::server::data::payment::{ChargeIds, PaymentRepository};

mod create;
mod queries;
mod update_status;
