mod nuclei_tests;
