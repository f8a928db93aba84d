use fund_fee_indexer::{
    libraries::{decimal_math::exponent_to_big_decimal, tick_math},
    price::raw_price_from_sqrt,
};

// we have 3 args, tick, decimals of token0 and decimals of token1

fn main() {
    let args: Vec<_> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: tick_to_price <tick> <decimals0> <decimals1>");
        std::process::exit(1);
    }

    let tick = args[1].parse::<i32>().expect("expected a valid tick");
    let decimals0 = args[2].parse::<u32>().expect("expected token0 decimals");
    let decimals1 = args[3].parse::<u32>().expect("expected token1 decimals");

    let sqrt_x96 = tick_math::get_sqrt_ratio_at_tick(tick).expect("tick out of bounds");
    let raw_price = raw_price_from_sqrt(sqrt_x96);

    // token1 per token0 in whole units
    let price = &raw_price * exponent_to_big_decimal(decimals0) / exponent_to_big_decimal(decimals1);

    println!("sqrt_x96 at tick {} is {}", tick, sqrt_x96);
    println!("token0 is worth {} token1 (raw {})", price, raw_price);
}
