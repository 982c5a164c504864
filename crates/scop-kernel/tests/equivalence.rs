use scop_kernel::verify::{check_equivalence, check_product, first_mismatch};
use scop_kernel::{
    run_config, InitPolicy, InterchangedKernel, Kernel, KernelKind, MatmulConfig, Matrix,
    ParallelKernel, ReferenceKernel, Shape, TiledKernel, Workspace,
};

fn all_kernels() -> Vec<Box<dyn Kernel<i32>>> {
    vec![
        Box::new(ReferenceKernel::new()),
        Box::new(InterchangedKernel::new()),
        Box::new(TiledKernel::new(8).unwrap()),
        Box::new(TiledKernel::with_tiles(3, 7, 5).unwrap()),
        Box::new(ParallelKernel::with_threads(4).unwrap()),
    ]
}

fn run(kernel: &dyn Kernel<i32>, a: &Matrix<i32>, b: &Matrix<i32>) -> Matrix<i32> {
    let mut ws = Workspace::with_operands(a.clone(), b.clone()).unwrap();
    ws.run(kernel);
    ws.c().clone()
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn test_2x2_product() {
    let a = Matrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
    let b = Matrix::from_rows(&[[5, 6], [7, 8]]).unwrap();
    let expected = Matrix::from_rows(&[[19, 22], [43, 50]]).unwrap();

    for kernel in all_kernels() {
        assert_eq!(run(kernel.as_ref(), &a, &b), expected, "{}", kernel.name());
    }
}

#[test]
fn test_2x2_identity_left() {
    let a = Matrix::identity(2);
    let b = Matrix::from_rows(&[[9, 1], [2, 3]]).unwrap();

    for kernel in all_kernels() {
        assert_eq!(run(kernel.as_ref(), &a, &b), b, "{}", kernel.name());
    }
}

// ============================================================
// Algebraic properties
// ============================================================

#[test]
fn test_identity_right_returns_a() {
    let size = 33;
    let a = Matrix::random(Shape::square(size), 7, 1000);
    let id = Matrix::identity(size);

    for kernel in all_kernels() {
        assert_eq!(run(kernel.as_ref(), &a, &id), a, "{}", kernel.name());
    }
}

#[test]
fn test_zero_operand_gives_zero() {
    let size = 21;
    let a = Matrix::random(Shape::square(size), 3, 1000);
    let zero = Matrix::square_zeros(size);

    for kernel in all_kernels() {
        assert_eq!(run(kernel.as_ref(), &a, &zero), zero, "{} (B = 0)", kernel.name());
        assert_eq!(run(kernel.as_ref(), &zero, &a), zero, "{} (A = 0)", kernel.name());
    }
}

#[test]
fn test_determinism() {
    let size = 40;
    let a = Matrix::random(Shape::square(size), 11, 500);
    let b = Matrix::random(Shape::square(size), 12, 500);

    for kernel in all_kernels() {
        let first = run(kernel.as_ref(), &a, &b);
        let second = run(kernel.as_ref(), &a, &b);
        assert_eq!(first, second, "{}", kernel.name());
    }
}

#[test]
fn test_matches_definition() {
    let size = 29;
    let a = Matrix::random(Shape::square(size), 100, 1 << 10);
    let b = Matrix::random(Shape::square(size), 200, 1 << 10);

    for kernel in all_kernels() {
        let c = run(kernel.as_ref(), &a, &b);
        check_product(&a, &b, &c).unwrap();
    }
}

// ============================================================
// Transformation equivalence
// ============================================================

#[test]
fn test_all_kinds_equivalent_across_sizes() {
    for size in [1usize, 2, 3, 8, 31, 32, 33, 64] {
        let a = Matrix::pattern(Shape::square(size), 17);
        let b = Matrix::random(Shape::square(size), size as u64, 50);

        for kind in KernelKind::ALL {
            let kernel = kind.build::<i32>(16, Some(3)).unwrap();
            check_equivalence(&a, &b, kernel.as_ref())
                .unwrap_or_else(|e| panic!("size {}: {}", size, e));
        }
    }
}

#[test]
fn test_non_square_equivalence() {
    let cases = [(32, 48, 64), (64, 48, 32), (13, 19, 17), (1, 50, 1)];

    for (m, k, n) in cases {
        let a = Matrix::<i64>::random(Shape::new(m, k), 5, 300);
        let b = Matrix::<i64>::random(Shape::new(k, n), 6, 300);
        let expected = a.matmul(&b, &ReferenceKernel::new()).unwrap();

        for kind in KernelKind::ALL {
            let kernel = kind.build::<i64>(6, Some(2)).unwrap();
            let got = a.matmul(&b, kernel.as_ref()).unwrap();
            assert_eq!(
                first_mismatch(&expected, &got).unwrap(),
                None,
                "{} on {}x{}x{}",
                kind,
                m,
                k,
                n
            );
        }
    }
}

// ============================================================
// Overflow wraps identically everywhere
// ============================================================

#[test]
fn test_overflow_wraps_consistently() {
    let size = 16;
    let big = Matrix::<i32>::from_fn(Shape::square(size), |r, c| {
        i32::MAX - (r * size + c) as i32
    });

    let expected = run(&ReferenceKernel::new(), &big, &big);
    check_product(&big, &big, &expected).unwrap();
    for kernel in all_kernels() {
        assert_eq!(run(kernel.as_ref(), &big, &big), expected, "{}", kernel.name());
    }
}

#[test]
fn test_i16_wraps() {
    let a = Matrix::<i16>::from_rows(&[[300, 0], [0, 1]]).unwrap();
    let b = Matrix::<i16>::from_rows(&[[300, 0], [0, 1]]).unwrap();
    let c = a.matmul(&b, &TiledKernel::new(1).unwrap()).unwrap();
    // 90_000 mod 2^16 = 24_464
    assert_eq!(c.get(0, 0), 24_464);
    assert_eq!(c.get(1, 1), 1);
}

// ============================================================
// Config-driven runs
// ============================================================

#[test]
fn test_run_config_every_kernel() {
    for kind in KernelKind::ALL {
        let config = MatmulConfig {
            dim: 20,
            kernel: kind,
            init: InitPolicy::Random { seed: 1, bound: 9 },
            tile: 6,
            threads: Some(2),
            verify: true,
        };
        let ws = run_config::<i32>(&config).unwrap();
        assert_eq!(ws.c().shape(), Shape::square(20));
    }
}

#[test]
#[ignore = "full 1024x1024 run, slow without --release"]
fn test_full_size_parallel_matches_reference() {
    let dim = scop_kernel::DEFAULT_DIM;
    let a = Matrix::<i32>::pattern(Shape::square(dim), 100);
    let b = Matrix::<i32>::pattern(Shape::square(dim), 97);
    check_equivalence(&a, &b, &ParallelKernel::new()).unwrap();
}
