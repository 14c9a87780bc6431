//! Join codes.

use rand::Rng;
use strictly_baseball::GameId;
use tracing::{debug, instrument};

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of a generated join code.
pub const GAME_ID_LEN: usize = 7;

/// Generates a random 7-character lowercase base-36 join code.
///
/// Uniqueness is not checked; collisions are left to chance.
#[instrument]
pub fn generate_game_id() -> GameId {
    let mut rng = rand::thread_rng();
    let code: String = (0..GAME_ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    debug!(game_id = %code, "Generated game id");
    GameId::from(code)
}
