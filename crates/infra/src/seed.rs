//! Sample data sets for the standalone seed tool.
//!
//! These go through `ItemStore::create` like any other write, so validation
//! and timestamps apply. Not part of the served API.

use carestock_inventory::{ItemType, NewItem};

fn entry(name: &str, item_type: ItemType, value: f64, notes: &str) -> NewItem {
    NewItem {
        name: name.to_string(),
        item_type,
        value,
        notes: Some(notes.to_string()),
    }
}

/// Default care-facility data set.
pub fn facility_items() -> Vec<NewItem> {
    use ItemType::{Percentage as Pct, Quantity as Qty};
    vec![
        entry("Wheelchairs", Qty, 12.0, "Standard wheelchairs available"),
        entry("Walker Inventory", Qty, 8.0, "Rolling walkers with seats"),
        entry("Oxygen Tanks", Qty, 15.0, "Small portable oxygen tanks"),
        entry("Hospital Beds", Qty, 6.0, "Adjustable hospital beds"),
        entry("Staff Attendance", Pct, 95.0, "Overall staff attendance rate"),
        entry("Medication Compliance", Pct, 98.0, "Medication administration compliance"),
        entry("Patient Satisfaction", Pct, 92.0, "Based on monthly surveys"),
        entry("Wound Care Supplies", Qty, 45.0, "Various bandages and dressings"),
        entry("Bed Occupancy Rate", Pct, 88.0, "Current facility occupancy"),
        entry("Blood Pressure Monitors", Qty, 10.0, "Digital BP monitors"),
    ]
}

/// Rehabilitation-center data set.
pub fn rehab_items() -> Vec<NewItem> {
    use ItemType::{Percentage as Pct, Quantity as Qty};
    vec![
        entry("Oven Cleaner", Qty, 10.0, "Kitchen use"),
        entry("Glass Cleaner", Qty, 1.0, "For mirrors/windows"),
        entry("Hand Soap 1 Gallon", Qty, 2.0, "Refill use"),
        entry("100% Nasan Nasal Spray 4 mg", Pct, 100.0, "Medical use"),
        entry("Large Paper Towel Rolls", Qty, 21.0, "Hand drying"),
        entry("Toilet Paper", Qty, 23.0, "Restroom"),
        entry("White Disposable Slippers", Qty, 38.0, "Guest use"),
        entry("CA-Rezz Incontinent Wash", Qty, 12.0, "Patient care"),
        entry("Table Tennis Balls", Qty, 24.0, "Recreation"),
        entry("A4 Paper", Qty, 24.0, "Office use"),
        entry("Scale", Qty, 2.0, "Medical use"),
        entry("Comb", Qty, 36.0, "Personal care"),
        entry("Ecos Laundry Detergent", Qty, 4.0, "Laundry"),
        entry("Scrub Sponges", Qty, 20.0, "Cleaning"),
        entry("Raincoat", Qty, 10.0, "Outdoor/emergency"),
    ]
}
