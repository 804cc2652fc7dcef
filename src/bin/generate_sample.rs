use std::path::Path;

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

/// Modelled issuance time in ms: grows with cluster size (threshold
/// signing rounds) and mildly with CSR size.
fn time_to_certificate(rng: &mut SimpleRng, num_nodes: u32, csr_size: u32) -> f64 {
    let base = 35.0 + 9.0 * (num_nodes as f64).log2() * (num_nodes as f64).sqrt();
    let csr_cost = csr_size as f64 / 64.0;
    let mean = base + csr_cost;
    let sample = rng.gauss(mean, mean * 0.12);
    // occasional straggler, like a request hitting a leader change
    let sample = if rng.next_f64() < 0.03 {
        sample * 2.5
    } else {
        sample
    };
    sample.max(1.0)
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let out_dir = Path::new("measurements");
    std::fs::create_dir_all(out_dir).expect("Failed to create measurements directory");

    // One file per (scenario, client), the way the benchmark clients
    // write them: header + one row per request.
    let scenarios: [(u32, u32); 5] = [(4, 100), (4, 200), (4, 400), (8, 100), (16, 100)];
    let clients = 2;
    let requests_per_client = 100;

    let mut files = 0;
    for &(num_nodes, csr_size) in &scenarios {
        for client in 1..=clients {
            let path = out_dir.join(format!("n{num_nodes}-csr{csr_size}-client{client}.csv"));
            let mut writer = csv::Writer::from_path(&path).expect("Failed to create output file");

            writer
                .write_record([
                    "time-to-certificate",
                    "num-nodes",
                    "csr-size",
                    "adversary-type",
                    "adversary-fraction",
                ])
                .expect("Failed to write header");

            for _ in 0..requests_per_client {
                let t2c = time_to_certificate(&mut rng, num_nodes, csr_size);
                writer
                    .write_record([
                        format!("{:.0}", t2c),
                        num_nodes.to_string(),
                        csr_size.to_string(),
                        "none".to_string(),
                        "0".to_string(),
                    ])
                    .expect("Failed to write row");
            }
            writer.flush().expect("Failed to flush file");
            files += 1;
        }
    }

    println!(
        "Wrote {files} measurement files ({} rows each) to {}",
        requests_per_client,
        out_dir.display()
    );
}
