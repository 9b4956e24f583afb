use classnav::app::refresh_catalog;
use classnav::config::Config;
use classnav::data::normalize::cell;
use classnav::fetch::FileSource;
use serde_json::{json, Value as JsonValue};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const SUBJECTS: [(&str, &str); 4] = [
    ("CS", "Computer Science"),
    ("MATH", "Mathematics"),
    ("PHYS", "Physics"),
    ("ENGL", "English"),
];
const BUILDINGS: [&str; 4] = ["Gallogly", "Devon", "Physical Sciences", "Dale"];
const INSTRUCTORS: [&str; 6] = ["Smith", "Jones", "Nguyen", "Garcia", "Okafor", "Lee"];
const SLOTS: [(&str, &str, &str); 5] = [
    ("09:00", "09:50", "MWF"),
    ("10:30", "11:45", "TR"),
    ("12:00", "12:50", "MWF"),
    ("13:30", "14:45", "TR"),
    ("15:00", "16:15", "MW"),
];

fn raw_row(rng: &mut SimpleRng, index: usize) -> JsonValue {
    let (subject, subject_name) = *rng.pick(&SUBJECTS);
    let course = 1000 + (rng.next_u64() % 4) * 1000 + rng.next_u64() % 100;
    let section = 1 + rng.next_u64() % 3;
    let (start, end, days) = *rng.pick(&SLOTS);
    let building = *rng.pick(&BUILDINGS);
    let room = 100 + rng.next_u64() % 300;
    let primary = *rng.pick(&INSTRUCTORS);
    let co = *rng.pick(&INSTRUCTORS);

    let instructors = if co == primary {
        format!("{primary}, ")
    } else {
        format!("{primary}, {co}")
    };

    let row = json!([
        format!("<span class=\"idx\">{}</span>", index + 1),
        format!("{}", 10000 + index),
        subject,
        course.to_string(),
        format!("{section:03}"),
        format!("{subject_name} {course}"),
        format!(" {primary} "),
        "Traditional",
        "In Person",
        "Undergraduate",
        "Full Semester",
        "Aug 22 - Dec 16",
        "",
        format!("Aug 22,Dec 16,{start},{end},{building},{room},{days}"),
        format!("Synthetic section of {subject_name}."),
        instructors,
        "",
        "",
    ]);
    debug_assert_eq!(row.as_array().map(Vec::len), Some(cell::COUNT));
    row
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = SimpleRng::new(42);
    let rows: Vec<JsonValue> = (0..120).map(|i| raw_row(&mut rng, i)).collect();

    let payload_path = "sample_catalog.json";
    std::fs::write(payload_path, serde_json::to_string_pretty(&json!({ "aaData": rows }))?)?;
    println!("Wrote {} raw rows to {payload_path}", rows.len());

    let config = Config::default();
    let store = refresh_catalog(&config, &FileSource::new(payload_path))?;
    println!(
        "Wrote {} classes to {}",
        store.len(),
        config.cache_path.display()
    );
    Ok(())
}
