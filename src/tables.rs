//! Fixed lookup tables used when a request does not supply its own name or location.

use rand::{
    seq::SliceRandom,
    Rng,
};

pub const APPLIANCES: [&str; 32] = [
    "Microwave",
    "Blender",
    "Toaster",
    "Coffee Machine",
    "Dishwasher",
    "Vacuum Cleaner",
    "Rice Cooker",
    "Air Fryer",
    "Food Processor",
    "Electric Kettle",
    "Washing Machine",
    "Dryer",
    "Refrigerator",
    "Oven",
    "Stand Mixer",
    "Juicer",
    "Slow Cooker",
    "Pressure Cooker",
    "Electric Grill",
    "Bread Machine",
    "Ice Maker",
    "Garbage Disposal",
    "Electric Can Opener",
    "Dehydrator",
    "Waffle Iron",
    "Electric Skillet",
    "Hot Plate",
    "Electric Griddle",
    "Pasta Machine",
    "Yogurt Maker",
    "Popcorn Maker",
    "Electric Wok",
];

pub const LOCATIONS: [&str; 52] = [
    "Tokyo",
    "Brooklyn",
    "Berlin",
    "Portland",
    "Montreal",
    "Austin",
    "Melbourne",
    "Amsterdam",
    "San Francisco",
    "London",
    "Barcelona",
    "Seattle",
    "Copenhagen",
    "Tel Aviv",
    "Stockholm",
    "Prague",
    "Vancouver",
    "Toronto",
    "Los Angeles",
    "Chicago",
    "Detroit",
    "Philadelphia",
    "Miami",
    "Denver",
    "Minneapolis",
    "Nashville",
    "Atlanta",
    "Phoenix",
    "San Diego",
    "Boston",
    "Pittsburgh",
    "New Orleans",
    "Manchester",
    "Edinburgh",
    "Dublin",
    "Oslo",
    "Helsinki",
    "Reykjavik",
    "Vienna",
    "Zurich",
    "Geneva",
    "Milan",
    "Rome",
    "Florence",
    "Venice",
    "Madrid",
    "Lisbon",
    "Porto",
    "Paris",
    "Lyon",
    "Nice",
    "Brussels",
];

pub fn random_appliance<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(&APPLIANCES, rng)
}

pub fn random_location<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(&LOCATIONS, rng)
}

fn pick<R: Rng + ?Sized>(table: &[&'static str], rng: &mut R) -> &'static str {
    // Both tables are non-empty constants
    table.choose(rng).copied().unwrap_or_default()
}
