mod assemble_sbom;

pub use assemble_sbom::AssembleSbomUseCase;
