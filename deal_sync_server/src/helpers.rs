use chrono::Utc;
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A fresh request correlation id: the current unix time in milliseconds and 9 random base-36 characters, e.g.
/// `1718000000000-k3j9x0q2a`.
pub fn new_request_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix = (0..9).map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())])).collect::<String>();
    format!("{}-{suffix}", Utc::now().timestamp_millis())
}
