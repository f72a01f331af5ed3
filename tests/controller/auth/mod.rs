mod login;

use super::*;
