use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use edgekit_image::{Image, ImageRoi};
use edgekit_imgproc::border::BorderType;
use edgekit_imgproc::filter::{filter_laplace_border_with, kernels::MaskSize};
use edgekit_imgproc::parallel::ExecutionStrategy;

fn bench_laplace_border(c: &mut Criterion) {
    let mut group = c.benchmark_group("Laplace Border");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for mask_size in [MaskSize::Size3x3, MaskSize::Size5x5] {
            group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

            let parameter_string = format!("{}x{}x{}", width, height, mask_size.side());

            // input image
            let image_data = (0..width * height).map(|i| (i % 251) as u8).collect();
            let image_size = [*width, *height].into();
            let image = Image::<u8, 1>::new(image_size, image_data).unwrap();

            // output image
            let output = Image::<u8, 1>::from_size_val(image_size, 0).unwrap();

            for (name, strategy) in [
                ("serial", ExecutionStrategy::Serial),
                ("parallel_rows", ExecutionStrategy::ParallelRows),
            ] {
                group.bench_with_input(
                    BenchmarkId::new(name, &parameter_string),
                    &(&image, &output),
                    |b, i| {
                        let (src, mut dst) = (i.0, i.1.clone());
                        b.iter(|| {
                            black_box(filter_laplace_border_with(
                                src,
                                &mut dst,
                                mask_size,
                                ImageRoi::full(src.size()),
                                &BorderType::Replicate,
                                strategy,
                            ))
                        })
                    },
                );
            }
        }
    }

    group.finish();
}

criterion_group!(benches, bench_laplace_border);
criterion_main!(benches);
