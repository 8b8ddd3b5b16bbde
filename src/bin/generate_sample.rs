//! Writes a deterministic synthetic air-quality CSV for demo runs:
//! three stations, four time labels per day, gaps and a couple of
//! malformed dates to exercise the permissive loader.

use std::fmt::Write as _;

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let locations = ["Khadakpada", "Airoli", "Worli"];
    let times = ["02:00", "08:00", "14:00", "20:00"];
    // (pollutant, base level, noise)
    let pollutants: [(&str, f64, f64); 9] = [
        ("PM2.5", 55.0, 12.0),
        ("PM10", 95.0, 20.0),
        ("NO", 18.0, 5.0),
        ("NO2", 32.0, 8.0),
        ("NOx", 48.0, 10.0),
        ("NH3", 12.0, 3.0),
        ("SO2", 14.0, 4.0),
        ("CO", 1.1, 0.3),
        ("Ozone", 38.0, 9.0),
    ];
    let days = 30u32;

    let mut csv = String::from("Date,Time,Location");
    for (name, _, _) in &pollutants {
        csv.push(',');
        csv.push_str(name);
    }
    csv.push('\n');

    let mut rows = 0u32;
    for day in 0..days {
        // Fixed January 2024 window, day-month-year format
        let date = format!("{:02}-01-2024", day + 1);

        for (loc_idx, location) in locations.iter().enumerate() {
            for (time_idx, time) in times.iter().enumerate() {
                // The first reading of day 8 at each station gets a
                // malformed date to exercise the permissive date parser.
                let date_cell = if day == 7 && time_idx == 0 {
                    "2024/01/08".to_string()
                } else {
                    date.clone()
                };

                let _ = write!(csv, "{date_cell},{time},{location}");

                // Afternoon readings run higher; each station has its own bias.
                let diurnal = if time_idx == 2 { 1.25 } else { 1.0 };
                let station_bias = 1.0 + loc_idx as f64 * 0.15;

                for (_, base, noise) in &pollutants {
                    // ~4% of cells left empty so forward-fill has work to do
                    if rng.next_f64() < 0.04 {
                        csv.push(',');
                        continue;
                    }
                    let level = (base * diurnal * station_bias + rng.gauss(0.0, *noise)).max(0.0);
                    let _ = write!(csv, ",{level:.1}");
                }
                csv.push('\n');
                rows += 1;
            }
        }
    }

    let output_path = "sample_air_quality.csv";
    std::fs::write(output_path, &csv).expect("Failed to write sample CSV");

    println!(
        "Wrote {} readings ({} locations x {} time labels x {} days) to {output_path}",
        rows,
        locations.len(),
        times.len(),
        days
    );
}
