use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use persona_engine::memory::SessionMemory;
use persona_engine::oracle::Unconfigured;
use persona_engine::{synthesize, ConversationMemory, Persona, PersonaGenerator, UserContext};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared_types::{GenerationConfig, ObjectAnalysis};
use std::sync::Arc;

fn sample_persona() -> Persona {
    let generator = PersonaGenerator::new(GenerationConfig::default(), Arc::new(Unconfigured));
    let context = UserContext {
        name: "Bolt".to_string(),
        purpose: "study buddy".to_string(),
        location: "desk".to_string(),
        time_together: "2 years".to_string(),
        ..UserContext::default()
    };
    generator.generate_from_analysis(&ObjectAnalysis::default(), &context, &mut StdRng::seed_from_u64(1))
}

fn filled_session(turns: usize) -> SessionMemory {
    let mut session = SessionMemory::new("bench", 20);
    for i in 0..turns {
        session.add_turn(&format!("today I studied chapter {i} and drank coffee"), "nice work");
    }
    session
}

fn synthesis_benchmarks(c: &mut Criterion) {
    let persona = sample_persona();
    let mut group = c.benchmark_group("prompt_synthesis");

    for turns in [0usize, 10, 100] {
        let session = filled_session(turns);
        group.bench_with_input(BenchmarkId::new("synthesize", turns), &session, |b, session| {
            b.iter(|| {
                let context = session.relevant_context("should I have more coffee?", 3);
                synthesize(&persona, "should I have more coffee?", &context.recent, &context)
            });
        });
    }
    group.finish();

    let rt = tokio::runtime::Runtime::new().unwrap();
    c.bench_function("memory_add_turn", |b| {
        b.to_async(&rt).iter(|| async {
            let memory = ConversationMemory::default();
            for i in 0..10 {
                memory.add_turn(&format!("message {i} about the weather"), "ok", "s1").await;
            }
        });
    });

    c.bench_function("persona_generation", |b| {
        b.iter(sample_persona);
    });
}

criterion_group!(benches, synthesis_benchmarks);
criterion_main!(benches);
