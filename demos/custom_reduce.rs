//! The dispatcher is opaque to the reduction being performed: this example
//! runs a max instead of a sum through the same fork-join machinery.

use fork_join::prelude::*;

fn main() -> Result<()> {
    println!("=== Custom Reduction (max) ===\n");

    let worker_cnt = 4;
    let values: Vec<u8> = (0..100_000u32)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8)
        .collect();

    let dispatcher = Dispatcher::with_config(DispatchConfig::new().with_name("max"));
    let partials = PartialSums::new(worker_cnt);

    dispatcher.dispatch(worker_cnt, |ctx| {
        let span = span_of(ctx.tid, ctx.worker_cnt, values.len());
        let local_max = values[span.start..span.end]
            .iter()
            .copied()
            .max()
            .unwrap_or(0);
        partials.record(ctx.tid, u64::from(local_max));
    })?;

    // Fold the mailbox with the same operator the workers used.
    let parallel_max = (0..worker_cnt).map(|tid| partials.get(tid)).max().unwrap_or(0);
    let sequential_max = u64::from(values.iter().copied().max().unwrap_or(0));

    println!("parallel max   = {}", parallel_max);
    println!("sequential max = {}", sequential_max);
    assert_eq!(parallel_max, sequential_max);

    Ok(())
}
