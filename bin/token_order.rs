use alloy_primitives::Address;

/// we have 2 args, token_a:Address, token_b:Address
/// returns token_0 and token_1 as a pool orders them
fn main() {
    let args: Vec<_> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: token_order <token_a> <token_b>");
        std::process::exit(1);
    }

    let token_a: Address = args[1].parse().expect("expected a valid address");
    let token_b: Address = args[2].parse().expect("expected a valid address");

    // sort token_a and b, token 0 is always the smaller address
    let (token0, token1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };

    println!("token_0: {} , token_1:{}", token0, token1);
}
