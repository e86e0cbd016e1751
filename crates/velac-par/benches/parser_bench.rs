use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use velac_lex::tokenize;
use velac_par::Parser;

fn parse_source(source: &str) {
    let tokens = tokenize(source, 1 << 20).expect("lex ok");
    Parser::new(tokens).parse_program().expect("parse ok");
}

fn bench_parser_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_arithmetic");
    let source = "(1 + 2 * 3 - 4 / 2 + 5 % 2)";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("expr", |b| b.iter(|| parse_source(black_box(source))));
    group.finish();
}

fn bench_parser_function(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_function");
    let source = r#"
        fn fib(n) (
          if n < 2 (return(n))
          return(fib(n - 1) + fib(n - 2))
        )
        (svc(fib(10)))
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("recursive_fn", |b| b.iter(|| parse_source(black_box(source))));
    group.finish();
}

criterion_group!(benches, bench_parser_arithmetic, bench_parser_function);
criterion_main!(benches);
