//! Records used by the encoder and list view tests

use chrono::{NaiveDate, NaiveDateTime};
use inertia::InertiaModel;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
	pub id: Option<u32>,
	pub name: String,
	pub password: String,
	pub birthdate: NaiveDate,
	pub registered_at: NaiveDateTime,
}

impl InertiaModel for User {}

#[derive(Debug, Clone, Serialize)]
pub struct Sport {
	pub id: u32,
	pub name: String,
	pub season: String,
	pub created_at: NaiveDateTime,
}

impl InertiaModel for Sport {
	fn inertia_fields() -> Option<&'static [&'static str]> {
		Some(&["id", "name", "created_at"])
	}
}

pub fn registered_at() -> NaiveDateTime {
	NaiveDate::from_ymd_opt(2022, 10, 31)
		.and_then(|date| date.and_hms_opt(10, 13, 1))
		.unwrap_or_default()
}

pub fn brandon() -> User {
	User {
		id: None,
		name: "Brandon".to_string(),
		password: "something-top-secret".to_string(),
		birthdate: NaiveDate::from_ymd_opt(1987, 2, 15).unwrap_or_default(),
		registered_at: registered_at(),
	}
}

pub fn sports() -> Vec<Sport> {
	vec![
		Sport {
			id: 1,
			name: "Hockey".to_string(),
			season: "Winter".to_string(),
			created_at: registered_at(),
		},
		Sport {
			id: 2,
			name: "Baseball".to_string(),
			season: "Summer".to_string(),
			created_at: registered_at(),
		},
	]
}
