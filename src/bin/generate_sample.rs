use serde::Serialize;

/// One output row, named after the dataset's columns.
#[derive(Serialize)]
struct CameraRow {
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Release date")]
    release_date: i32,
    #[serde(rename = "Dimensions")]
    dimensions: f64,
    #[serde(rename = "Weight (inc. batteries)")]
    weight: f64,
    #[serde(rename = "Price")]
    price: Option<f64>,
    #[serde(rename = "Storage included")]
    storage_included: f64,
    #[serde(rename = "Effective pixels")]
    effective_pixels: f64,
    #[serde(rename = "Zoom wide (W)")]
    zoom_wide: f64,
    #[serde(rename = "Zoom tele (T)")]
    zoom_tele: f64,
}

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round_to(v: f64, step: f64) -> f64 {
    (v / step).round() * step
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let brands: [(&str, &[&str]); 6] = [
        ("Canon", &["PowerShot A", "PowerShot S", "PowerShot G", "EOS"]),
        ("Nikon", &["Coolpix", "D"]),
        ("Sony", &["Cyber-shot DSC-W", "Cyber-shot DSC-H", "Alpha"]),
        ("Kodak", &["EasyShare C", "EasyShare Z", "DC"]),
        ("Olympus", &["Stylus", "Camedia C", "E"]),
        ("Fujifilm", &["FinePix S", "FinePix F", "FinePix Z"]),
    ];
    let storage_sizes = [2.0, 8.0, 16.0, 32.0, 64.0];

    let n_rows = 400;
    let output_path = "camera_dataset.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    for i in 0..n_rows {
        let (brand, lines) = rng.pick(&brands);
        let line = rng.pick(*lines);
        let year = 1994 + (rng.next_u64() % 14) as i32;

        // Resolution and price drift upward over the years.
        let age = (year - 1994) as f64;
        let effective_pixels = round_to(0.3 + age * 0.7 + rng.range(0.0, 3.0), 1.0);
        let zoom_wide = round_to(rng.range(24.0, 40.0), 1.0);
        let optical = *rng.pick(&[1.0, 3.0, 3.0, 4.0, 5.0, 10.0, 12.0]);
        let zoom_tele = round_to(zoom_wide * optical, 1.0);
        let price = round_to(120.0 + optical * 35.0 + rng.range(0.0, 600.0), 1.0);

        let mut row = CameraRow {
            model: format!("{brand} {line}{}", 100 + i),
            release_date: year,
            dimensions: round_to(rng.range(80.0, 140.0), 1.0),
            weight: round_to(rng.range(120.0, 900.0), 5.0),
            price: Some(price),
            storage_included: *rng.pick(&storage_sizes),
            effective_pixels,
            zoom_wide,
            zoom_tele,
        };

        // Sprinkle in rows the dashboard's cleaning step should drop or
        // treat specially.
        match i % 40 {
            7 => row.weight = 0.0,
            19 => row.price = None,
            23 => row.storage_included = 0.0,
            31 => {
                row.zoom_wide = 0.0;
                row.zoom_tele = 0.0;
            }
            _ => {}
        }

        writer.serialize(&row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {n_rows} cameras to {output_path}");
}
