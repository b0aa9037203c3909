use wasm_bindgen::prelude::*;

mod game;

use game::BottleFlip;

flip_web::export_stage!(BottleFlip, "bottle-flip");
