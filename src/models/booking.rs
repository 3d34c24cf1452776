use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRange {
    Adult,
    Kid,
}

impl AgeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRange::Adult => "Adult",
            AgeRange::Kid => "Kid",
        }
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub passengers: String,
    pub age_range: AgeRange,
    pub is_completed: bool,
}

impl Booking {
    pub fn route_text(&self) -> String {
        format!("{} ⇌ {}", self.origin, self.destination)
    }

    pub fn status_text(&self) -> &'static str {
        if self.is_completed {
            "Complete"
        } else {
            "Pending"
        }
    }
}

/// Insertion-ordered collection of one session's bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingStore {
    bookings: Vec<Booking>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Stores whatever the form sends: empty route fields and a return date
    // before the departure date are all accepted as-is.
    pub fn create(
        &mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        passengers: impl Into<String>,
        age_range: AgeRange,
    ) -> Booking {
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            origin: origin.into(),
            destination: destination.into(),
            departure_date,
            return_date,
            passengers: passengers.into(),
            age_range,
            is_completed: false,
        };
        self.bookings.push(booking.clone());
        booking
    }

    pub fn list(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|booking| booking.id == id)
    }

    pub fn toggle_completed(&mut self, id: &str) {
        if let Some(booking) = self.bookings.iter_mut().find(|booking| booking.id == id) {
            booking.is_completed = !booking.is_completed;
        }
    }

    pub fn delete(&mut self, id: &str) {
        self.bookings.retain(|booking| booking.id != id);
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
