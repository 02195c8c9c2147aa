pub mod job_evictor;
